//! Room Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    rooms::{into_status_error, responses::RoomResponse},
    state::State,
};

/// Room Index Handler
///
/// Returns every room with its room type, ordered by room number.
#[endpoint(tags("rooms"), summary = "List Rooms")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<RoomResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let rooms = state
        .app
        .rooms
        .list_rooms()
        .await
        .map_err(into_status_error)?;

    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}
