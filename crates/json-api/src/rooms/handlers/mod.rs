//! Room Handlers

pub(crate) mod index;
