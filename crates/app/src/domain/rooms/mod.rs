//! Rooms
//!
//! The room catalog and the availability resolver built on top of it.

pub mod catalog;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::RoomsServiceError;
pub(crate) use repository::{PgRoomsRepository, try_get_room_type};
pub use service::*;
