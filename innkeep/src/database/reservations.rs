//! Reservation rows, overlap queries and the number sequence table.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::{Money, PaymentStatus, Reservation, ReservationStatus, StayDates};

use super::connection::Database;

const RESERVATION_COLUMNS: &str = "reservation_id, reservation_number, guest_id, room_id, \
     check_in_date, check_out_date, status, notes, nights, rate_per_night, subtotal, tax_rate, \
     tax, discount, total_amount, amount_paid, payment_status, created_by, created_at";

/// Active statuses as an SQL list; must match [`ReservationStatus::is_active`].
const ACTIVE_STATUSES_SQL: &str = "('PENDING', 'CONFIRMED', 'CHECKED_IN')";

/// Converts a UTC timestamp to Unix epoch seconds for storage.
pub(super) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts stored Unix epoch seconds back to a UTC timestamp.
pub(super) fn unix_secs_to_datetime(idx: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, secs))
}

fn decimal_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let number: String = row.get(1)?;
    let created_secs: i64 = row.get(18)?;
    Ok(Reservation {
        id: row.get(0)?,
        number: number.into(),
        guest_id: row.get(2)?,
        room_id: row.get(3)?,
        check_in: row.get(4)?,
        check_out: row.get(5)?,
        status: row.get(6)?,
        notes: row.get(7)?,
        nights: row.get(8)?,
        rate_per_night: row.get(9)?,
        subtotal: row.get(10)?,
        tax_rate: decimal_column(row, 11)?,
        tax: row.get(12)?,
        discount: row.get(13)?,
        total: row.get(14)?,
        amount_paid: row.get(15)?,
        payment_status: row.get(16)?,
        created_by: row.get(17)?,
        created_at: unix_secs_to_datetime(18, created_secs)?,
    })
}

impl Database {
    /// Inserts a reservation, ignoring `reservation.id`, and returns the new id.
    ///
    /// # Errors
    ///
    /// Returns a database error, including a UNIQUE violation on a duplicate
    /// reservation number.
    pub fn insert_reservation(conn: &Connection, reservation: &Reservation) -> Result<i64> {
        conn.execute(
            "INSERT INTO reservations (reservation_number, guest_id, room_id, check_in_date, \
             check_out_date, status, notes, nights, rate_per_night, subtotal, tax_rate, tax, \
             discount, total_amount, amount_paid, payment_status, created_by, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, \
             ?17, ?18)",
            params![
                reservation.number.as_str(),
                reservation.guest_id,
                reservation.room_id,
                reservation.check_in,
                reservation.check_out,
                reservation.status,
                reservation.notes,
                reservation.nights,
                reservation.rate_per_night,
                reservation.subtotal,
                reservation.tax_rate.to_string(),
                reservation.tax,
                reservation.discount,
                reservation.total,
                reservation.amount_paid,
                reservation.payment_status,
                reservation.created_by,
                datetime_to_unix_secs(reservation.created_at),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Rewrites every mutable column of an existing reservation.
    ///
    /// The number, creator and creation time are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn update_reservation(conn: &Connection, reservation: &Reservation) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE reservations SET room_id = ?1, check_in_date = ?2, check_out_date = ?3, \
             status = ?4, notes = ?5, nights = ?6, rate_per_night = ?7, subtotal = ?8, \
             tax_rate = ?9, tax = ?10, discount = ?11, total_amount = ?12, amount_paid = ?13, \
             payment_status = ?14, guest_id = ?15 WHERE reservation_id = ?16",
            params![
                reservation.room_id,
                reservation.check_in,
                reservation.check_out,
                reservation.status,
                reservation.notes,
                reservation.nights,
                reservation.rate_per_night,
                reservation.subtotal,
                reservation.tax_rate.to_string(),
                reservation.tax,
                reservation.discount,
                reservation.total,
                reservation.amount_paid,
                reservation.payment_status,
                reservation.guest_id,
                reservation.id,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Writes only the booking status.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn update_reservation_status(
        conn: &Connection,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE reservations SET status = ?1 WHERE reservation_id = ?2",
            params![status, reservation_id],
        )?;
        Ok(rows > 0)
    }

    /// Writes `amount_paid` and `payment_status`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn update_payment_fields(
        conn: &Connection,
        reservation_id: i64,
        amount_paid: Money,
        payment_status: PaymentStatus,
    ) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE reservations SET amount_paid = ?1, payment_status = ?2 \
             WHERE reservation_id = ?3",
            params![amount_paid, payment_status, reservation_id],
        )?;
        Ok(rows > 0)
    }

    /// Deletes a reservation row. Payments must be removed first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the delete fails.
    pub fn delete_reservation(conn: &Connection, reservation_id: i64) -> Result<bool> {
        let rows = conn.execute(
            "DELETE FROM reservations WHERE reservation_id = ?1",
            [reservation_id],
        )?;
        Ok(rows > 0)
    }

    /// Loads a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn get_reservation(conn: &Connection, reservation_id: i64) -> Result<Option<Reservation>> {
        let reservation = conn
            .query_row(
                &format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = ?1"),
                [reservation_id],
                row_to_reservation,
            )
            .optional()?;
        Ok(reservation)
    }

    /// Loads a reservation by its number.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn get_reservation_by_number(conn: &Connection, number: &str) -> Result<Option<Reservation>> {
        let reservation = conn
            .query_row(
                &format!(
                    "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_number = ?1"
                ),
                [number],
                row_to_reservation,
            )
            .optional()?;
        Ok(reservation)
    }

    /// Lists all reservations, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_all_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             ORDER BY created_at DESC, reservation_id DESC"
        ))?;
        let reservations = stmt
            .query_map([], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists a guest's reservations, latest check-in first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_reservations_for_guest(
        conn: &Connection,
        guest_id: i64,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE guest_id = ?1 \
             ORDER BY check_in_date DESC, reservation_id DESC"
        ))?;
        let reservations = stmt
            .query_map([guest_id], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists a room's active reservations ordered by check-in.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_active_reservations_for_room(
        conn: &Connection,
        room_id: i64,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE room_id = ?1 AND status IN {ACTIVE_STATUSES_SQL} \
             ORDER BY check_in_date, reservation_id"
        ))?;
        let reservations = stmt
            .query_map([room_id], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists active reservations overlapping `stay`, ordered by check-in then room.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_active_reservations_overlapping(
        conn: &Connection,
        stay: &StayDates,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE status IN {ACTIVE_STATUSES_SQL} \
             AND check_in_date < ?2 AND ?1 < check_out_date \
             ORDER BY check_in_date, room_id, reservation_id"
        ))?;
        let reservations = stmt
            .query_map(params![stay.check_in(), stay.check_out()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Returns `true` if an active reservation on `room_id` overlaps `stay`.
    ///
    /// `[a1, a2)` and `[b1, b2)` overlap iff `a1 < b2 AND b1 < a2`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn has_active_overlap(
        conn: &Connection,
        room_id: i64,
        stay: &StayDates,
        exclude_reservation_id: Option<i64>,
    ) -> Result<bool> {
        let overlap = conn.query_row(
            &format!(
                "SELECT EXISTS (SELECT 1 FROM reservations \
                 WHERE room_id = ?1 AND status IN {ACTIVE_STATUSES_SQL} \
                 AND check_in_date < ?3 AND ?2 < check_out_date \
                 AND (?4 IS NULL OR reservation_id <> ?4))"
            ),
            params![room_id, stay.check_in(), stay.check_out(), exclude_reservation_id],
            |row| row.get(0),
        )?;
        Ok(overlap)
    }

    /// Returns `true` if an active reservation on `room_id` covers `date`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn has_active_reservation_covering(
        conn: &Connection,
        room_id: i64,
        date: NaiveDate,
    ) -> Result<bool> {
        let covered = conn.query_row(
            &format!(
                "SELECT EXISTS (SELECT 1 FROM reservations \
                 WHERE room_id = ?1 AND status IN {ACTIVE_STATUSES_SQL} \
                 AND check_in_date <= ?2 AND ?2 < check_out_date)"
            ),
            params![room_id, date],
            |row| row.get(0),
        )?;
        Ok(covered)
    }

    /// Ids of rooms with an active reservation overlapping `stay`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn rooms_booked_during(conn: &Connection, stay: &StayDates) -> Result<HashSet<i64>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT DISTINCT room_id FROM reservations \
             WHERE status IN {ACTIVE_STATUSES_SQL} \
             AND check_in_date < ?2 AND ?1 < check_out_date"
        ))?;
        let ids = stmt
            .query_map(params![stay.check_in(), stay.check_out()], |row| row.get(0))?
            .collect::<std::result::Result<HashSet<_>, rusqlite::Error>>()?;
        Ok(ids)
    }

    /// Counts reservations of any status that reference `room_id`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn count_reservations_for_room(conn: &Connection, room_id: i64) -> Result<u64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM reservations WHERE room_id = ?1",
            [room_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Counts all reservations.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn count_reservations(conn: &Connection) -> Result<u64> {
        let count = conn.query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Reservations created in `[from, to)`, grouped by UTC creation day.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn count_reservations_created_by_day(
        conn: &Connection,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, u64)>> {
        let mut stmt = conn.prepare(
            "SELECT date(created_at, 'unixepoch') AS day, COUNT(*) FROM reservations \
             WHERE created_at >= ?1 AND created_at < ?2 GROUP BY day ORDER BY day",
        )?;
        let counts = stmt
            .query_map(
                params![datetime_to_unix_secs(from), datetime_to_unix_secs(to)],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(counts)
    }

    /// Every reservation number that starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn reservation_numbers_with_prefix(conn: &Connection, prefix: &str) -> Result<Vec<String>> {
        // substr instead of LIKE so '_' in a prefix is never a wildcard
        let mut stmt = conn.prepare(
            "SELECT reservation_number FROM reservations \
             WHERE substr(reservation_number, 1, length(?1)) = ?1",
        )?;
        let numbers = stmt
            .query_map([prefix], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(numbers)
    }

    /// Highest suffix ever issued for `prefix`, if recorded.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn get_sequence_value(conn: &Connection, prefix: &str) -> Result<Option<u32>> {
        let value = conn
            .query_row(
                "SELECT last_value FROM reservation_sequences WHERE prefix = ?1",
                [prefix],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Records `value` as the highest suffix issued for `prefix`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the upsert fails.
    pub fn set_sequence_value(conn: &Connection, prefix: &str, value: u32) -> Result<()> {
        conn.execute(
            "INSERT INTO reservation_sequences (prefix, last_value) VALUES (?1, ?2) \
             ON CONFLICT(prefix) DO UPDATE SET last_value = excluded.last_value",
            params![prefix, value],
        )?;
        Ok(())
    }
}
