//! Currency amounts.
//!
//! Every monetary value in innkeep is a [`Money`], a thin newtype over
//! [`rust_decimal::Decimal`]. Derived amounts are rounded half-up to two
//! decimal places with [`Money::round2`] after each step, and amounts are
//! persisted as decimal text so no binary floating point ever reaches the
//! store.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A currency amount.
///
/// # Examples
///
/// ```
/// use innkeep::Money;
///
/// let rate: Money = "100.00".parse().unwrap();
/// let subtotal = rate.checked_times(5).unwrap().round2();
/// assert_eq!(subtotal.to_string(), "500.00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates an amount from a mantissa and scale, e.g. `Money::new(53000, 2)` is `530.00`.
    #[must_use]
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    /// Wraps a raw decimal.
    #[must_use]
    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Rounds half-up to two decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Money;
    ///
    /// assert_eq!(Money::new(10005, 3).round2(), Money::new(1001, 2));
    /// assert_eq!(Money::new(10004, 3).round2(), Money::new(1000, 2));
    /// ```
    #[must_use]
    pub fn round2(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies by a whole count (nights). `None` on overflow.
    #[must_use]
    pub fn checked_times(self, count: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(count)).map(Self)
    }

    /// Returns `percent` percent of this amount, unrounded. `None` on overflow.
    #[must_use]
    pub fn checked_percent(self, percent: Decimal) -> Option<Self> {
        self.0
            .checked_mul(percent)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .map(Self)
    }

    /// Adds two amounts. `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtracts `rhs`. `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sums amounts. `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }

    /// Clamps negative amounts to zero.
    #[must_use]
    pub fn floor_zero(self) -> Self {
        if self.0.is_sign_negative() {
            Self::ZERO
        } else {
            self
        }
    }

    /// Returns `true` for amounts strictly greater than zero.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` for amounts strictly below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }
}

/// Validation error for arithmetic that left the representable range.
pub(crate) fn out_of_range(field: &str) -> Error {
    Error::validation(field, "amount is out of range")
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(_) => {
                let text = value.as_str()?;
                Decimal::from_str(text)
                    .map(Self)
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
            ValueRef::Integer(i) => Ok(Self(Decimal::from(i))),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}
