//! Errors

use salvo::http::StatusError;
use tracing::error;

use hotel_app::domain::reservations::ReservationsServiceError;

pub(crate) fn into_status_error(error: ReservationsServiceError) -> StatusError {
    match error {
        ReservationsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Reservation already exists")
        }
        ReservationsServiceError::Unavailable => {
            StatusError::conflict().brief("No rooms available for the requested dates")
        }
        ReservationsServiceError::NotFound => {
            StatusError::not_found().brief("Reservation not found")
        }
        ReservationsServiceError::InvalidReference
        | ReservationsServiceError::MissingRequiredData
        | ReservationsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid reservation payload")
        }
        ReservationsServiceError::Sql(source) => {
            error!("reservation storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
