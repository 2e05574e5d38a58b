//! Reservation Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod room_types;
pub(crate) mod rooms;
pub(crate) mod update;
pub(crate) mod user_index;
