//! Query and body parameter parsing.

use jiff::civil::Date;
use salvo::prelude::StatusError;
use serde::Deserialize;

use hotel_app::domain::stays::StayDates;

use crate::extensions::*;

/// Raw availability query string. Values are checked by the accessors so each
/// problem gets its own 400 brief.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailabilityQuery {
    pub checkin_date: Option<String>,
    pub checkout_date: Option<String>,
    pub guest_capacity: Option<String>,
    pub room_type: Option<String>,
}

impl AvailabilityQuery {
    pub(crate) fn stay(&self) -> Result<StayDates, StatusError> {
        stay(
            required("checkinDate", self.checkin_date.as_deref())?,
            required("checkoutDate", self.checkout_date.as_deref())?,
        )
    }

    pub(crate) fn guest_capacity(&self) -> Result<u32, StatusError> {
        required("guestCapacity", self.guest_capacity.as_deref())?
            .parse::<u32>()
            .or_400("could not parse guestCapacity, expected a non-negative integer")
    }

    pub(crate) fn room_type(&self) -> Result<String, StatusError> {
        required("roomType", self.room_type.as_deref()).map(ToString::to_string)
    }
}

/// Parse and validate a `checkinDate`/`checkoutDate` pair.
pub(crate) fn stay(checkin: &str, checkout: &str) -> Result<StayDates, StatusError> {
    let checkin = parse_date("checkinDate", checkin)?;
    let checkout = parse_date("checkoutDate", checkout)?;

    StayDates::new(checkin, checkout).or_400("checkinDate must be before checkoutDate")
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, StatusError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StatusError::bad_request().brief(format!("missing {name} parameter")))
}

fn parse_date(name: &str, value: &str) -> Result<Date, StatusError> {
    value
        .trim()
        .parse::<Date>()
        .or_400(&format!("could not parse {name}, expected YYYY-MM-DD"))
}
