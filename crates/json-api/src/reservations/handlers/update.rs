//! Update Reservation Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use hotel_app::domain::reservations::{ReservationsServiceError, data::ReservationUpdate};

use crate::{
    extensions::*,
    observability::{ReservationOperation, ReservationOutcome, record_reservation},
    reservations::{into_status_error, params, responses::ReservationResponse},
    state::State,
};

/// Update Reservation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateReservationRequest {
    /// New first night (YYYY-MM-DD)
    pub checkin_date: String,

    /// New departure day (YYYY-MM-DD)
    pub checkout_date: String,
}

/// Update Reservation Handler
///
/// Moves a reservation to new dates. The guest keeps the same room; if that
/// room is taken for the new dates nothing is changed.
#[endpoint(
    tags("reservations"),
    summary = "Update Reservation",
    responses(
        (status_code = StatusCode::OK, description = "Reservation updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Reservation not found"),
        (status_code = StatusCode::CONFLICT, description = "Room is taken for the new dates"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    reservation: PathParam<Uuid>,
    json: JsonBody<UpdateReservationRequest>,
    depot: &mut Depot,
) -> Result<Json<ReservationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let reservation = reservation.into_inner();
    let request = json.into_inner();
    let stay = params::stay(&request.checkin_date, &request.checkout_date)?;

    let updated = state
        .app
        .reservations
        .update_reservation(reservation.into(), ReservationUpdate { stay })
        .await
        .map_err(|error| match error {
            ReservationsServiceError::Unavailable => {
                record_reservation(ReservationOperation::Update, ReservationOutcome::Unavailable);

                StatusError::conflict().brief(format!(
                    "The reserved room is not available from {} to {}",
                    stay.checkin(),
                    stay.checkout()
                ))
            }
            other => into_status_error(other),
        })?;

    record_reservation(ReservationOperation::Update, ReservationOutcome::Moved);

    info!(reservation = %updated.uuid, %stay, "moved reservation");

    Ok(Json(updated.into()))
}
