//! Reservations Data

use crate::domain::{
    reservations::records::{Guest, ReservationUuid},
    stays::StayDates,
};

/// New Reservation Data
///
/// The room is chosen by the service: the lowest-numbered free room of
/// `room_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub uuid: ReservationUuid,
    pub room_type: String,
    pub stay: StayDates,
    pub user: Guest,
}

/// Reservation Update Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationUpdate {
    pub stay: StayDates,
}
