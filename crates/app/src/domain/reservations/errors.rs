//! Reservations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// SQLSTATE raised when the no-overlap exclusion constraint rejects a row.
const EXCLUSION_VIOLATION: &str = "23P01";

#[derive(Debug, Error)]
pub enum ReservationsServiceError {
    #[error("reservation already exists")]
    AlreadyExists,

    #[error("reservation not found")]
    NotFound,

    #[error("no rooms available for the given dates and type")]
    Unavailable,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReservationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if let Some(database_error) = error.as_database_error()
            && database_error.code().as_deref() == Some(EXCLUSION_VIOLATION)
        {
            return Self::Unavailable;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
