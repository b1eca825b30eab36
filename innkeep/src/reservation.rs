//! Reservation records and their status axes.
//!
//! A reservation carries two independent statuses: the booking status
//! ([`ReservationStatus`]), driven by the lifecycle operations, and the
//! payment status ([`PaymentStatus`]), a pure function of the amount paid
//! and the total.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{Money, StayDates};

/// Booking status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Booked, not yet confirmed.
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Guest is in the room.
    CheckedIn,
    /// Called off; never blocks the room.
    Cancelled,
    /// Guest has left; never blocks the room.
    CheckedOut,
}

impl ReservationStatus {
    /// Statuses that occupy the room for overlap purposes.
    pub const ACTIVE: [Self; 3] = [Self::Pending, Self::Confirmed, Self::CheckedIn];

    /// Statuses accepted when a reservation is first created.
    pub const CREATABLE: [Self; 3] = [Self::Pending, Self::Confirmed, Self::CheckedIn];

    /// Statuses accepted by update and status changes.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::CheckedIn,
        Self::Cancelled,
        Self::CheckedOut,
    ];

    /// Stored/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::CheckedIn => "CHECKED_IN",
            Self::Cancelled => "CANCELLED",
            Self::CheckedOut => "CHECKED_OUT",
        }
    }

    /// Returns `true` for PENDING, CONFIRMED and CHECKED_IN.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::CheckedIn)
    }

    /// Normalizes an optional status string against a whitelist.
    ///
    /// Blank or missing input means PENDING. Input is trimmed and
    /// upper-cased before matching.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the status is unknown or not in
    /// `allowed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::ReservationStatus;
    ///
    /// let allowed = &ReservationStatus::CREATABLE;
    /// assert_eq!(ReservationStatus::normalize(None, allowed).unwrap(), ReservationStatus::Pending);
    /// assert_eq!(
    ///     ReservationStatus::normalize(Some(" confirmed "), allowed).unwrap(),
    ///     ReservationStatus::Confirmed
    /// );
    /// assert!(ReservationStatus::normalize(Some("CANCELLED"), allowed).is_err());
    /// ```
    pub fn normalize(input: Option<&str>, allowed: &[Self]) -> Result<Self> {
        let status = match input.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::Pending,
            Some(raw) => raw.parse()?,
        };
        if allowed.contains(&status) {
            Ok(status)
        } else {
            Err(Error::validation(
                "status",
                format!("status {status} is not allowed here"),
            ))
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CHECKED_IN" => Ok(Self::CheckedIn),
            "CANCELLED" => Ok(Self::Cancelled),
            "CHECKED_OUT" => Ok(Self::CheckedOut),
            other => Err(Error::validation(
                "status",
                format!("invalid status '{other}'"),
            )),
        }
    }
}

/// How much of a reservation's total has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Nothing paid.
    Unpaid,
    /// Something paid, balance outstanding.
    Partial,
    /// Paid in full.
    Paid,
}

impl PaymentStatus {
    /// Derives the payment status from the amount paid and the total.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Money, PaymentStatus};
    ///
    /// let total = Money::new(53000, 2);
    /// assert_eq!(PaymentStatus::derive(Money::ZERO, total), PaymentStatus::Unpaid);
    /// assert_eq!(PaymentStatus::derive(Money::new(20000, 2), total), PaymentStatus::Partial);
    /// assert_eq!(PaymentStatus::derive(total, total), PaymentStatus::Paid);
    /// ```
    #[must_use]
    pub fn derive(amount_paid: Money, total: Money) -> Self {
        if !amount_paid.is_positive() {
            Self::Unpaid
        } else if amount_paid >= total {
            Self::Paid
        } else {
            Self::Partial
        }
    }

    /// Stored/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Partial => "PARTIAL",
            Self::Paid => "PAID",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "UNPAID" => Ok(Self::Unpaid),
            "PARTIAL" => Ok(Self::Partial),
            "PAID" => Ok(Self::Paid),
            other => Err(Error::validation(
                "payment_status",
                format!("invalid payment status '{other}'"),
            )),
        }
    }
}

macro_rules! text_column {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_column!(ReservationStatus);
text_column!(PaymentStatus);

/// A booking reference of the form `RES-YYYYMMDD-NNN`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationNumber(String);

impl ReservationNumber {
    /// The prefix shared by every number for a check-in date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::ReservationNumber;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
    /// assert_eq!(ReservationNumber::prefix_for(date), "RES-20260210-");
    /// ```
    #[must_use]
    pub fn prefix_for(check_in: NaiveDate) -> String {
        format!("RES-{}-", check_in.format("%Y%m%d"))
    }

    /// Builds the number for a check-in date and sequence value.
    ///
    /// The suffix is zero-padded to three digits and widens past 999.
    #[must_use]
    pub fn compose(check_in: NaiveDate, sequence: u32) -> Self {
        Self(format!("{}{sequence:03}", Self::prefix_for(check_in)))
    }

    /// Parses the numeric suffix if `raw` carries `prefix`.
    #[must_use]
    pub fn suffix_of(raw: &str, prefix: &str) -> Option<u32> {
        let tail = raw.strip_prefix(prefix)?;
        if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        tail.parse().ok()
    }

    /// The number as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ReservationNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReservationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store identifier.
    pub id: i64,
    /// Booking reference.
    pub number: ReservationNumber,
    /// Guest reference.
    pub guest_id: i64,
    /// Room reference.
    pub room_id: i64,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
    /// Booking status.
    pub status: ReservationStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Whole nights.
    pub nights: u32,
    /// Rate snapshot taken when the reservation was priced.
    pub rate_per_night: Money,
    /// `round2(nights * rate_per_night)`.
    pub subtotal: Money,
    /// Tax rate in percent used for `tax`.
    pub tax_rate: Decimal,
    /// Tax amount.
    pub tax: Money,
    /// Discount amount.
    pub discount: Money,
    /// Amount due.
    pub total: Money,
    /// Sum of recorded payments.
    pub amount_paid: Money,
    /// Derived from `amount_paid` and `total`.
    pub payment_status: PaymentStatus,
    /// User that created the reservation.
    pub created_by: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// The stay as a validated date range.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stored dates are inverted.
    pub fn stay(&self) -> Result<StayDates> {
        StayDates::new(self.check_in, self.check_out)
    }

    /// Outstanding balance, never below zero.
    #[must_use]
    pub fn balance(&self) -> Money {
        self.total
            .checked_sub(self.amount_paid)
            .map_or(Money::ZERO, Money::floor_zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
    }

    #[test]
    fn test_status_parse_normalizes_case() {
        assert_eq!(
            "checked_in".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::CheckedIn
        );
        assert!("BOOKED".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_active_set() {
        for status in ReservationStatus::ACTIVE {
            assert!(status.is_active());
        }
        assert!(!ReservationStatus::Cancelled.is_active());
        assert!(!ReservationStatus::CheckedOut.is_active());
    }

    #[test]
    fn test_normalize_whitelists() {
        let created = ReservationStatus::normalize(Some("checked_in"), &ReservationStatus::CREATABLE);
        assert_eq!(created.unwrap(), ReservationStatus::CheckedIn);

        let rejected =
            ReservationStatus::normalize(Some("checked_out"), &ReservationStatus::CREATABLE);
        assert!(rejected.unwrap_err().is_validation());

        let updated = ReservationStatus::normalize(Some("cancelled"), &ReservationStatus::ALL);
        assert_eq!(updated.unwrap(), ReservationStatus::Cancelled);

        let blank = ReservationStatus::normalize(Some("   "), &ReservationStatus::ALL);
        assert_eq!(blank.unwrap(), ReservationStatus::Pending);
    }

    #[test]
    fn test_payment_status_derive() {
        let total = Money::new(53000, 2);
        assert_eq!(PaymentStatus::derive(Money::ZERO, total), PaymentStatus::Unpaid);
        assert_eq!(
            PaymentStatus::derive(Money::new(20000, 2), total),
            PaymentStatus::Partial
        );
        assert_eq!(PaymentStatus::derive(total, total), PaymentStatus::Paid);
        assert_eq!(
            PaymentStatus::derive(Money::new(-5, 0), total),
            PaymentStatus::Unpaid
        );
    }

    #[test]
    fn test_payment_status_zero_total() {
        // A fully discounted stay with nothing paid is still UNPAID.
        assert_eq!(
            PaymentStatus::derive(Money::ZERO, Money::ZERO),
            PaymentStatus::Unpaid
        );
    }

    #[test]
    fn test_reservation_number_compose() {
        assert_eq!(
            ReservationNumber::compose(date(10), 1).as_str(),
            "RES-20260210-001"
        );
        assert_eq!(
            ReservationNumber::compose(date(10), 42).as_str(),
            "RES-20260210-042"
        );
        assert_eq!(
            ReservationNumber::compose(date(10), 1000).as_str(),
            "RES-20260210-1000"
        );
    }

    #[test]
    fn test_reservation_number_suffix_of() {
        let prefix = ReservationNumber::prefix_for(date(10));
        assert_eq!(ReservationNumber::suffix_of("RES-20260210-007", &prefix), Some(7));
        assert_eq!(ReservationNumber::suffix_of("RES-20260210-1002", &prefix), Some(1002));
        assert_eq!(ReservationNumber::suffix_of("RES-20260210-x1", &prefix), None);
        assert_eq!(ReservationNumber::suffix_of("RES-20260211-001", &prefix), None);
        assert_eq!(ReservationNumber::suffix_of("RES-20260210-", &prefix), None);
    }
}
