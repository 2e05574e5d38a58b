//! Room Records

use rust_decimal::Decimal;

/// Room Type Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTypeRecord {
    pub id: i32,
    pub name: String,
    pub guest_capacity: u32,
    pub price: Decimal,
}

/// Room Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    /// Room number, unique across the property.
    pub number: i32,

    /// The room's type, embedded.
    pub room_type: RoomTypeRecord,
}
