//! Reservations

mod errors;
mod handlers;
mod params;
pub(crate) mod responses;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
