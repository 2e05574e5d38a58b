//! Default property catalog.

use rust_decimal::Decimal;

use crate::domain::rooms::data::{NewRoom, NewRoomType};

const SINGLE: i32 = 0;
const DOUBLE: i32 = 1;
const FAMILY: i32 = 2;
const SUITE: i32 = 3;

/// `(number, room type id)` for every room on the property.
const ROOMS: [(i32, i32); 24] = [
    (101, SINGLE),
    (102, SINGLE),
    (103, SINGLE),
    (104, SINGLE),
    (105, DOUBLE),
    (106, DOUBLE),
    (201, SINGLE),
    (202, SINGLE),
    (203, SINGLE),
    (204, DOUBLE),
    (205, DOUBLE),
    (206, DOUBLE),
    (301, DOUBLE),
    (302, DOUBLE),
    (303, FAMILY),
    (304, SUITE),
    (305, SINGLE),
    (306, DOUBLE),
    (401, SINGLE),
    (402, DOUBLE),
    (403, FAMILY),
    (404, SUITE),
    (405, SINGLE),
    (406, SUITE),
];

/// Catalog contents to install into an empty database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub room_types: Vec<NewRoomType>,
    pub rooms: Vec<NewRoom>,
}

impl Catalog {
    /// The property's standard room types and rooms.
    pub fn standard() -> Self {
        let room_types = [
            (SINGLE, "Single", 1, 80),
            (DOUBLE, "Double", 2, 120),
            (FAMILY, "Family", 4, 200),
            (SUITE, "Suite", 4, 300),
        ]
        .into_iter()
        .map(|(id, name, guest_capacity, price)| NewRoomType {
            id,
            name: name.to_string(),
            guest_capacity,
            price: Decimal::new(price, 0),
        })
        .collect();

        let rooms = ROOMS
            .into_iter()
            .map(|(number, room_type_id)| NewRoom {
                number,
                room_type_id,
            })
            .collect();

        Self { room_types, rooms }
    }
}
