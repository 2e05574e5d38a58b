//! Test Helpers

use crate::domain::{
    reservations::{
        data::NewReservation,
        records::{Guest, ReservationUuid},
    },
    stays::StayDates,
};

pub(crate) fn new_reservation(room_type: &str, stay: StayDates, user_id: &str) -> NewReservation {
    NewReservation {
        uuid: ReservationUuid::new(),
        room_type: room_type.to_string(),
        stay,
        user: Guest::new(user_id),
    }
}
