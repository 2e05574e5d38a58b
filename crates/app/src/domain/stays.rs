//! Stay date ranges and the overlap rule used for availability.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("check-in date {checkin} must be before check-out date {checkout}")]
pub struct InvalidStayError {
    pub checkin: Date,
    pub checkout: Date,
}

/// A half-open `[checkin, checkout)` range of nights.
///
/// The checkout day is not occupied, so one guest may check out on the same
/// day the next guest checks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStay", into = "RawStay")]
pub struct StayDates {
    checkin: Date,
    checkout: Date,
}

impl StayDates {
    /// Create a stay, rejecting empty or inverted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStayError`] unless `checkin < checkout`.
    pub fn new(checkin: Date, checkout: Date) -> Result<Self, InvalidStayError> {
        if checkin >= checkout {
            return Err(InvalidStayError { checkin, checkout });
        }

        Ok(Self { checkin, checkout })
    }

    pub fn checkin(&self) -> Date {
        self.checkin
    }

    pub fn checkout(&self) -> Date {
        self.checkout
    }

    /// Number of nights covered by the stay.
    pub fn nights(&self) -> i32 {
        self.checkin
            .until(self.checkout)
            .map_or(0, |span| span.get_days())
    }

    /// Whether two stays share at least one night.
    ///
    /// Mirrors the SQL predicate `$checkin < checkout_date AND $checkout > checkin_date`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.checkin < other.checkout && self.checkout > other.checkin
    }
}

impl Display for StayDates {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}..{}", self.checkin, self.checkout)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStay {
    checkin_date: Date,
    checkout_date: Date,
}

impl TryFrom<RawStay> for StayDates {
    type Error = InvalidStayError;

    fn try_from(raw: RawStay) -> Result<Self, Self::Error> {
        Self::new(raw.checkin_date, raw.checkout_date)
    }
}

impl From<StayDates> for RawStay {
    fn from(stay: StayDates) -> Self {
        Self {
            checkin_date: stay.checkin,
            checkout_date: stay.checkout,
        }
    }
}
