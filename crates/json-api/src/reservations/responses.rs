//! Reservation Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use hotel_app::domain::reservations::records::ReservationRecord;

use crate::rooms::responses::RoomResponse;

/// Reservation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReservationResponse {
    /// Reservation identifier
    pub id: Uuid,

    /// The booked room
    pub room: RoomResponse,

    /// The guest, with `id` and any profile fields supplied at booking
    #[salvo(schema(value_type = Object))]
    pub user: Value,

    /// First night of the stay (YYYY-MM-DD)
    pub checkin_date: String,

    /// Departure day, not occupied (YYYY-MM-DD)
    pub checkout_date: String,

    /// The date and time the reservation was created
    pub created_at: String,

    /// The date and time the reservation was last updated
    pub updated_at: String,
}

impl From<ReservationRecord> for ReservationResponse {
    fn from(reservation: ReservationRecord) -> Self {
        Self {
            id: reservation.uuid.into_uuid(),
            room: reservation.room.into(),
            user: reservation.user.to_json(),
            checkin_date: reservation.stay.checkin().to_string(),
            checkout_date: reservation.stay.checkout().to_string(),
            created_at: reservation.created_at.to_string(),
            updated_at: reservation.updated_at.to_string(),
        }
    }
}
