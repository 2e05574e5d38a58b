//! Delete Reservation Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, reservations::into_status_error, state::State};

/// Delete Reservation Handler
///
/// Succeeds whether or not the reservation existed.
#[endpoint(
    tags("reservations"),
    summary = "Delete Reservation",
    responses(
        (status_code = StatusCode::OK, description = "Reservation deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    reservation: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .reservations
        .delete_reservation(reservation.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
