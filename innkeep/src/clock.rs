//! Time source for operations.
//!
//! Operations stamp `created_at`/`paid_at` and derive "today" from a
//! [`Clock`], so tests can pin the date a room sync sees.

use chrono::{DateTime, NaiveDate, Utc};

/// Where the current time comes from.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, NaiveDate};
/// use innkeep::Clock;
///
/// let fixed = DateTime::parse_from_rfc3339("2026-02-12T10:00:00Z").unwrap().to_utc();
/// let clock = Clock::Fixed(fixed);
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 2, 12).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// The system clock.
    #[default]
    System,
    /// A pinned instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// A clock pinned to midnight UTC of `date`.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        Self::Fixed(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    /// The current instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(instant) => *instant,
        }
    }

    /// The current UTC calendar date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
