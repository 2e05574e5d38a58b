//! Reservations

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ReservationsServiceError;
pub use service::*;
