//! Room Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use hotel_app::domain::rooms::records::{RoomRecord, RoomTypeRecord};

/// Room Type Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomTypeResponse {
    /// Room type identifier
    pub id: i32,

    /// Display name, e.g. "Double"
    pub name: String,

    /// Maximum number of guests
    pub guest_capacity: u32,

    /// Nightly price as a decimal string
    pub price: String,
}

impl From<RoomTypeRecord> for RoomTypeResponse {
    fn from(room_type: RoomTypeRecord) -> Self {
        Self {
            id: room_type.id,
            name: room_type.name,
            guest_capacity: room_type.guest_capacity,
            price: room_type.price.to_string(),
        }
    }
}

/// Room Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoomResponse {
    /// Room number
    pub number: i32,

    /// The room's type
    #[serde(rename = "type")]
    pub room_type: RoomTypeResponse,
}

impl From<RoomRecord> for RoomResponse {
    fn from(room: RoomRecord) -> Self {
        Self {
            number: room.number,
            room_type: room.room_type.into(),
        }
    }
}
