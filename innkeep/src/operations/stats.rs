//! Dashboard statistics.
//!
//! Day and month boundaries are UTC.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::Money;

/// Longest trailing window the series will cover.
pub const MAX_SERIES_DAYS: u32 = 3660;

/// One day of the creation series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// `YYYY-MM-DD`.
    pub label: String,
    /// Reservations created that day.
    pub count: u64,
}

/// Headline numbers for the front desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Every reservation ever created, any status.
    pub total_reservations: u64,
    /// Payments received in the current calendar month.
    pub revenue_this_month: Money,
    /// Reservations created per day, oldest first, ending today.
    pub series: Vec<DayCount>,
}

/// Computes dashboard statistics as of `today`.
///
/// `days <= 0` falls back to the configured default window.
///
/// # Errors
///
/// Returns a validation error if the window exceeds [`MAX_SERIES_DAYS`],
/// or a database error.
pub fn dashboard_stats(
    conn: &Connection,
    days: i64,
    today: NaiveDate,
    config: &Config,
) -> Result<DashboardStats> {
    let days = if days <= 0 {
        config.dashboard_days()
    } else {
        u32::try_from(days).unwrap_or(u32::MAX)
    };
    if days > MAX_SERIES_DAYS {
        return Err(Error::validation(
            "days",
            format!("window of {days} days exceeds {MAX_SERIES_DAYS}"),
        ));
    }

    let total_reservations = Database::count_reservations(conn)?;

    let month_start = today.with_day(1).unwrap_or(today);
    let next_month = month_start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| Error::validation("today", "date out of range"))?;
    let revenue_this_month =
        Database::sum_payments_between(conn, midnight(month_start), midnight(next_month))?
            .round2();

    let first_day = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| Error::validation("days", "window reaches before the calendar"))?;
    let tomorrow = today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| Error::validation("today", "date out of range"))?;
    let counts: HashMap<NaiveDate, u64> =
        Database::count_reservations_created_by_day(conn, midnight(first_day), midnight(tomorrow))?
            .into_iter()
            .collect();

    let series = first_day
        .iter_days()
        .take(days as usize)
        .map(|day| DayCount {
            label: day.format("%Y-%m-%d").to_string(),
            count: counts.get(&day).copied().unwrap_or(0),
        })
        .collect();

    log::debug!("dashboard stats for {days} day(s) ending {today}");
    Ok(DashboardStats {
        total_reservations,
        revenue_this_month,
        series,
    })
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, insert_test_guest, insert_test_room};
    use rusqlite::params;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn secs(date: NaiveDate, hour: u32) -> i64 {
        date.and_hms_opt(hour, 0, 0).unwrap().and_utc().timestamp()
    }

    fn reserve(conn: &Connection, number: &str, created: i64) -> i64 {
        let room = insert_test_room(conn, number, "100");
        let guest = insert_test_guest(conn, "Ada", number);
        conn.execute(
            "INSERT INTO reservations (reservation_number, guest_id, room_id, check_in_date, \
             check_out_date, status, nights, rate_per_night, subtotal, tax_rate, tax, discount, \
             total_amount, amount_paid, payment_status, created_by, created_at) \
             VALUES (?1, ?2, ?3, '2026-03-01', '2026-03-02', 'CANCELLED', 1, '100', '100', '0', \
             '0', '0', '100', '0', 'UNPAID', 1, ?4)",
            params![number, guest, room, created],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn pay(conn: &Connection, reservation: i64, amount: &str, at: i64) {
        conn.execute(
            "INSERT INTO reservation_payments (reservation_id, paid_amount, paid_at, created_by) \
             VALUES (?1, ?2, ?3, 1)",
            params![reservation, amount, at],
        )
        .unwrap();
    }

    #[test]
    fn test_series_shape_and_counts() {
        let db = create_test_database();
        let conn = db.connection();
        let today = d(2, 12);
        reserve(conn, "A", secs(d(2, 12), 9));
        reserve(conn, "B", secs(d(2, 12), 23));
        reserve(conn, "C", secs(d(2, 10), 0));
        reserve(conn, "D", secs(d(2, 5), 12));

        let stats = dashboard_stats(conn, 7, today, &Config::default()).unwrap();
        assert_eq!(stats.total_reservations, 4);
        assert_eq!(stats.series.len(), 7);
        assert_eq!(stats.series[0].label, "2026-02-06");
        assert_eq!(stats.series[6].label, "2026-02-12");
        assert_eq!(stats.series[6].count, 2);
        assert_eq!(stats.series[4].count, 1);
        let in_window: u64 = stats.series.iter().map(|b| b.count).sum();
        assert_eq!(in_window, 3);
    }

    #[test]
    fn test_default_window() {
        let db = create_test_database();
        let stats = dashboard_stats(db.connection(), 0, d(2, 12), &Config::default()).unwrap();
        assert_eq!(stats.series.len(), 30);
        assert_eq!(stats.series.last().unwrap().label, "2026-02-12");
        assert!(stats.series.iter().all(|b| b.count == 0));

        let stats = dashboard_stats(db.connection(), -3, d(2, 12), &Config::default()).unwrap();
        assert_eq!(stats.series.len(), 30);
    }

    #[test]
    fn test_revenue_this_month_only() {
        let db = create_test_database();
        let conn = db.connection();
        let rid = reserve(conn, "A", 0);
        pay(conn, rid, "10.50", secs(d(1, 31), 23));
        pay(conn, rid, "20.25", secs(d(2, 1), 0));
        pay(conn, rid, "30.00", secs(d(2, 28), 23));
        pay(conn, rid, "99", secs(d(3, 1), 0));

        let stats = dashboard_stats(conn, 1, d(2, 12), &Config::default()).unwrap();
        assert_eq!(stats.revenue_this_month, "50.25".parse::<Money>().unwrap());
        assert_eq!(stats.series.len(), 1);
    }

    #[test]
    fn test_window_too_large() {
        let db = create_test_database();
        let err = dashboard_stats(db.connection(), 100_000, d(2, 12), &Config::default())
            .unwrap_err();
        assert!(err.is_validation());
    }
}
