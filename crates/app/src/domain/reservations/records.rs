//! Reservation Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    domain::{rooms::records::RoomRecord, stays::StayDates},
    uuids::TypedUuid,
};

/// Reservation UUID
pub type ReservationUuid = TypedUuid<ReservationRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuestError {
    #[error("user must be a JSON object")]
    NotAnObject,

    #[error("user must have a non-empty string \"id\"")]
    MissingId,
}

/// The guest a reservation is held for.
///
/// Only `id` is interpreted; any other profile fields are stored and returned
/// as they were given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,

    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Guest {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            profile: Map::new(),
        }
    }

    /// Split a JSON user object into its id and remaining profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` is not an object or lacks a string `id`.
    pub fn from_json(value: Value) -> Result<Self, GuestError> {
        let Value::Object(mut profile) = value else {
            return Err(GuestError::NotAnObject);
        };

        let id = match profile.remove("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id,
            _ => return Err(GuestError::MissingId),
        };

        Ok(Self { id, profile })
    }

    /// The full user object, `id` included.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = self.profile.clone();

        object.insert("id".to_string(), Value::String(self.id.clone()));

        Value::Object(object)
    }
}

/// Reservation Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRecord {
    pub uuid: ReservationUuid,
    pub room: RoomRecord,
    pub stay: StayDates,
    pub user: Guest,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
