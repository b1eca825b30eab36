//! Common test utilities for integration tests.

pub mod database;

use chrono::NaiveDate;

/// A date in February 2026, the month most scenarios run in.
#[allow(dead_code)]
pub fn feb(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
}

/// Parses a money literal.
#[allow(dead_code)]
pub fn money(s: &str) -> innkeep::Money {
    s.parse().unwrap()
}
