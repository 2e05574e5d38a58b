//! Available Rooms Handler

use std::sync::Arc;

use salvo::prelude::*;

use hotel_app::domain::rooms::data::RoomAvailability;

use crate::{
    extensions::*,
    reservations::params::AvailabilityQuery,
    rooms::{into_status_error, responses::RoomResponse},
    state::State,
};

/// Available Rooms Handler
///
/// Query parameters: `checkinDate`, `checkoutDate` (YYYY-MM-DD) and
/// `roomType`. Returns the rooms of that type free for the whole stay, lowest
/// room number first. An unknown room type yields an empty list.
#[endpoint(
    tags("reservations"),
    summary = "Available Rooms",
    responses(
        (status_code = StatusCode::OK, description = "Free rooms of the type"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<RoomResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = req
        .parse_queries::<AvailabilityQuery>()
        .or_400("could not parse query string")?;

    let rooms = state
        .app
        .rooms
        .available_rooms(RoomAvailability {
            stay: query.stay()?,
            room_type: query.room_type()?,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}
