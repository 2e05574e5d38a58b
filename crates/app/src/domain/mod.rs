//! Hotel Domain Concerns

pub mod reservations;
pub mod rooms;
pub mod stays;
