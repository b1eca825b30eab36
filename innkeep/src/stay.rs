//! Half-open stay date ranges.
//!
//! A stay occupies the nights `[check_in, check_out)`: the check-out date
//! itself is free, so a departure and an arrival on the same day never
//! collide.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated `[check_in, check_out)` date range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::StayDates;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
/// let stay = StayDates::new(d(10), d(15)).unwrap();
/// assert_eq!(stay.nights(), 5);
/// assert!(stay.covers(d(14)));
/// assert!(!stay.covers(d(15)));
///
/// // Check-out must come after check-in.
/// assert!(StayDates::new(d(15), d(15)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    /// Creates a stay, rejecting `check_out <= check_in`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if check-out is not strictly after check-in.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(Error::validation(
                "check_out_date",
                format!("check-out {check_out} must be after check-in {check_in}"),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// First night of the stay.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Departure date (not occupied).
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights between check-in and check-out; always at least 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }

    /// Half-open overlap: `a1 < b2 && b1 < a2`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns `true` if `date` is one of the occupied nights.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

impl fmt::Display for StayDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}
