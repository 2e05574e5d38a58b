//! Rooms Data

use rust_decimal::Decimal;

use crate::domain::stays::StayDates;

/// New Room Type Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoomType {
    pub id: i32,
    pub name: String,
    pub guest_capacity: u32,
    pub price: Decimal,
}

/// New Room Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub number: i32,
    pub room_type_id: i32,
}

/// Room type availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomTypeAvailability {
    pub stay: StayDates,
    pub min_guest_capacity: u32,
}

/// Room availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAvailability {
    pub stay: StayDates,
    pub room_type: String,
}
