//! User Reservations Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    reservations::{into_status_error, responses::ReservationResponse},
    state::State,
};

/// User Reservations Handler
///
/// Returns every reservation held by the guest, earliest check-in first. An
/// unknown guest has no reservations.
#[endpoint(
    tags("reservations"),
    summary = "List User Reservations",
    responses(
        (status_code = StatusCode::OK, description = "Reservations for the guest"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<ReservationResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reservations = state
        .app
        .reservations
        .list_user_reservations(user_id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}
