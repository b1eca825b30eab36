//! Room records and room status.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::Money;

/// Highest nightly rate a room may carry, in whole currency units.
pub const MAX_RATE_PER_NIGHT: i64 = 1_000_000_000;

/// A room's displayed occupancy label.
///
/// `Available` and `Booked` are derived from the room's reservations.
/// `Maintenance` is set by hand and sticks until cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    /// No active reservation covers today.
    Available,
    /// An active reservation covers today.
    Booked,
    /// Pinned out of service.
    Maintenance,
}

impl RoomStatus {
    /// Stored/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Booked => "BOOKED",
            Self::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "BOOKED" => Ok(Self::Booked),
            "MAINTENANCE" => Ok(Self::Maintenance),
            other => Err(Error::validation(
                "room_status",
                format!("unknown room status '{other}'"),
            )),
        }
    }
}

impl ToSql for RoomStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for RoomStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Store identifier.
    pub id: i64,
    /// Unique business key, e.g. `"101"`.
    pub room_number: String,
    /// Free-form room category.
    pub room_type: String,
    /// Current nightly rate. Reservations keep their own snapshot.
    pub rate_per_night: Money,
    /// Maximum occupancy.
    pub max_guests: u32,
    /// Displayed status.
    pub status: RoomStatus,
    /// Optional marketing description.
    pub description: Option<String>,
    /// Optional picture.
    pub image_url: Option<String>,
}

/// Input for creating or replacing a room.
///
/// # Examples
///
/// ```
/// use innkeep::{Money, RoomSpec};
///
/// let spec = RoomSpec::new("101", "Deluxe", Money::new(12000, 2)).with_max_guests(3);
/// assert!(spec.validate().is_ok());
/// assert!(RoomSpec::new("  ", "Deluxe", Money::ZERO).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSpec {
    /// Unique room number.
    pub room_number: String,
    /// Room category.
    pub room_type: String,
    /// Nightly rate; zero is allowed here but such a room cannot be booked.
    pub rate_per_night: Money,
    /// Maximum occupancy, at least 1.
    pub max_guests: u32,
    /// Optional description.
    pub description: Option<String>,
    /// Optional picture URL.
    pub image_url: Option<String>,
}

impl RoomSpec {
    /// Creates a spec with a single-guest default occupancy.
    #[must_use]
    pub fn new(
        room_number: impl Into<String>,
        room_type: impl Into<String>,
        rate_per_night: Money,
    ) -> Self {
        Self {
            room_number: room_number.into(),
            room_type: room_type.into(),
            rate_per_night,
            max_guests: 1,
            description: None,
            image_url: None,
        }
    }

    /// Sets the maximum occupancy.
    #[must_use]
    pub const fn with_max_guests(mut self, max_guests: u32) -> Self {
        self.max_guests = max_guests;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Validates the fields and returns a trimmed copy.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty room number, a rate that is
    /// negative or above [`MAX_RATE_PER_NIGHT`], or zero occupancy.
    pub fn validate(&self) -> Result<Self> {
        let room_number = self.room_number.trim();
        if room_number.is_empty() {
            return Err(Error::validation("room_number", "room number is required"));
        }
        if self.rate_per_night.is_negative() {
            return Err(Error::validation(
                "rate_per_night",
                "rate must not be negative",
            ));
        }
        if self.rate_per_night > Money::new(MAX_RATE_PER_NIGHT, 0) {
            return Err(Error::validation(
                "rate_per_night",
                format!("rate must not exceed {MAX_RATE_PER_NIGHT}"),
            ));
        }
        if self.max_guests == 0 {
            return Err(Error::validation(
                "max_guests",
                "room must hold at least one guest",
            ));
        }
        Ok(Self {
            room_number: room_number.to_string(),
            room_type: self.room_type.trim().to_string(),
            rate_per_night: self.rate_per_night.round2(),
            max_guests: self.max_guests,
            description: trimmed(self.description.as_deref()),
            image_url: trimmed(self.image_url.as_deref()),
        })
    }
}

pub(crate) fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
