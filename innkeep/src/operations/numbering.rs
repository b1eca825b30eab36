//! Reservation number generation.
//!
//! Numbers look like `RES-YYYYMMDD-NNN`, scoped to the check-in date. The
//! next suffix is one past the highest ever issued for the prefix, which is
//! the larger of the recorded sequence value and the highest parseable
//! suffix still in the reservations table. Recording the sequence means a
//! deleted top number is never handed out again.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::ReservationNumber;

/// Issues the next reservation number for `check_in`.
///
/// Must run inside the caller's write transaction: the read of the current
/// maximum and the sequence update are only atomic under the write lock.
///
/// # Errors
///
/// Returns a database error, or a conflict if the sequence is exhausted.
pub fn next_number(conn: &Connection, check_in: NaiveDate) -> Result<ReservationNumber> {
    let prefix = ReservationNumber::prefix_for(check_in);

    let recorded = Database::get_sequence_value(conn, &prefix)?.unwrap_or(0);
    let existing = Database::reservation_numbers_with_prefix(conn, &prefix)?
        .iter()
        .filter_map(|number| ReservationNumber::suffix_of(number, &prefix))
        .max()
        .unwrap_or(0);

    let next = recorded
        .max(existing)
        .checked_add(1)
        .ok_or_else(|| Error::conflict(format!("reservation numbers exhausted for {prefix}")))?;

    Database::set_sequence_value(conn, &prefix, next)?;
    let number = ReservationNumber::compose(check_in, next);
    log::debug!("issued reservation number {number}");
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, insert_test_guest, insert_test_room};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
    }

    fn insert_number(conn: &Connection, number: &str) -> i64 {
        let room = Database::list_room_ids(conn).unwrap()[0];
        conn.execute(
            "INSERT INTO reservations (reservation_number, guest_id, room_id, check_in_date, \
             check_out_date, status, nights, rate_per_night, subtotal, tax_rate, tax, discount, \
             total_amount, amount_paid, payment_status, created_by, created_at) \
             VALUES (?1, 1, ?2, '2026-02-10', '2026-02-11', 'CANCELLED', 1, '1', '1', '0', '0', \
             '0', '1', '0', 'UNPAID', 1, 0)",
            rusqlite::params![number, room],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn setup() -> Database {
        let db = create_test_database();
        insert_test_room(db.connection(), "101", "100");
        insert_test_guest(db.connection(), "Ada", "1");
        db
    }

    #[test]
    fn test_first_number_for_date() {
        let db = setup();
        let number = next_number(db.connection(), d(10)).unwrap();
        assert_eq!(number.as_str(), "RES-20260210-001");
    }

    #[test]
    fn test_sequential_per_prefix() {
        let db = setup();
        let conn = db.connection();
        assert_eq!(next_number(conn, d(10)).unwrap().as_str(), "RES-20260210-001");
        assert_eq!(next_number(conn, d(10)).unwrap().as_str(), "RES-20260210-002");
        assert_eq!(next_number(conn, d(11)).unwrap().as_str(), "RES-20260211-001");
    }

    #[test]
    fn test_continues_after_existing_rows() {
        let db = setup();
        let conn = db.connection();
        insert_number(conn, "RES-20260210-007");
        insert_number(conn, "RES-20260210-bogus");
        assert_eq!(next_number(conn, d(10)).unwrap().as_str(), "RES-20260210-008");
    }

    #[test]
    fn test_not_reused_after_delete() {
        let db = setup();
        let conn = db.connection();
        let first = next_number(conn, d(10)).unwrap();
        let id = insert_number(conn, first.as_str());
        let second = next_number(conn, d(10)).unwrap();
        let second_id = insert_number(conn, second.as_str());
        assert_eq!(second.as_str(), "RES-20260210-002");

        Database::delete_reservation(conn, second_id).unwrap();
        Database::delete_reservation(conn, id).unwrap();
        assert_eq!(next_number(conn, d(10)).unwrap().as_str(), "RES-20260210-003");
    }

    #[test]
    fn test_widens_past_999() {
        let db = setup();
        let conn = db.connection();
        Database::set_sequence_value(conn, "RES-20260210-", 999).unwrap();
        assert_eq!(next_number(conn, d(10)).unwrap().as_str(), "RES-20260210-1000");
    }
}
