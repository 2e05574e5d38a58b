//! Errors

use salvo::http::StatusError;
use tracing::error;

use hotel_app::domain::rooms::RoomsServiceError;

pub(crate) fn into_status_error(error: RoomsServiceError) -> StatusError {
    match error {
        RoomsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Room catalog entry already exists")
        }
        RoomsServiceError::InvalidReference | RoomsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid room query")
        }
        RoomsServiceError::Sql(source) => {
            error!("failed to query rooms: {source}");

            StatusError::internal_server_error()
        }
    }
}
