//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{debug, error};

/// Map errors to HTTP errors: client mistakes to 400, anything else to a logged 500.
pub(crate) trait ResultExt<T> {
    fn or_400(self, brief: &str) -> Result<T, StatusError>;

    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            debug!("{brief}: {error}");

            StatusError::bad_request().brief(brief)
        })
    }

    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn or_400_keeps_brief() {
        let result: Result<(), &str> = Err("bad date");

        let error = result.or_400("could not parse checkinDate").err();

        assert_eq!(error.as_ref().map(|e| e.code), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            error.map(|e| e.brief),
            Some("could not parse checkinDate".to_string())
        );
    }

    #[test]
    fn or_500_hides_detail() {
        let result: Result<(), &str> = Err("connection reset");

        let error = result.or_500("failed to list rooms").err();

        assert_eq!(
            error.map(|e| e.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
