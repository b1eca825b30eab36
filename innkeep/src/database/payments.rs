//! Payment rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::money::out_of_range;
use crate::{Money, Payment};

use super::connection::Database;
use super::reservations::{datetime_to_unix_secs, unix_secs_to_datetime};

const PAYMENT_COLUMNS: &str =
    "payment_id, reservation_id, paid_amount, paid_at, method, note, created_by";

fn row_to_payment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Payment> {
    let paid_secs: i64 = row.get(3)?;
    Ok(Payment {
        id: row.get(0)?,
        reservation_id: row.get(1)?,
        amount: row.get(2)?,
        paid_at: unix_secs_to_datetime(3, paid_secs)?,
        method: row.get(4)?,
        note: row.get(5)?,
        created_by: row.get(6)?,
    })
}

impl Database {
    /// Inserts a payment, ignoring `payment.id`, and returns the new id.
    ///
    /// # Errors
    ///
    /// Returns a database error, including a foreign-key violation for an
    /// unknown reservation.
    pub fn insert_payment(conn: &Connection, payment: &Payment) -> Result<i64> {
        conn.execute(
            "INSERT INTO reservation_payments (reservation_id, paid_amount, paid_at, method, \
             note, created_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                payment.reservation_id,
                payment.amount,
                datetime_to_unix_secs(payment.paid_at),
                payment.method,
                payment.note,
                payment.created_by,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Loads a payment by id.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn get_payment(conn: &Connection, payment_id: i64) -> Result<Option<Payment>> {
        let payment = conn
            .query_row(
                &format!("SELECT {PAYMENT_COLUMNS} FROM reservation_payments WHERE payment_id = ?1"),
                [payment_id],
                row_to_payment,
            )
            .optional()?;
        Ok(payment)
    }

    /// Deletes a payment row.
    ///
    /// # Errors
    ///
    /// Returns a database error if the delete fails.
    pub fn delete_payment(conn: &Connection, payment_id: i64) -> Result<bool> {
        let rows = conn.execute(
            "DELETE FROM reservation_payments WHERE payment_id = ?1",
            [payment_id],
        )?;
        Ok(rows > 0)
    }

    /// Deletes every payment of a reservation, returning how many went.
    ///
    /// # Errors
    ///
    /// Returns a database error if the delete fails.
    pub fn delete_payments_for_reservation(conn: &Connection, reservation_id: i64) -> Result<usize> {
        let rows = conn.execute(
            "DELETE FROM reservation_payments WHERE reservation_id = ?1",
            [reservation_id],
        )?;
        Ok(rows)
    }

    /// A reservation's payments, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_payments_for_reservation(
        conn: &Connection,
        reservation_id: i64,
    ) -> Result<Vec<Payment>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM reservation_payments WHERE reservation_id = ?1 \
             ORDER BY paid_at DESC, payment_id DESC"
        ))?;
        let payments = stmt
            .query_map([reservation_id], row_to_payment)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(payments)
    }

    /// Sum of a reservation's stored payments.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn sum_payments_for_reservation(conn: &Connection, reservation_id: i64) -> Result<Money> {
        let mut stmt =
            conn.prepare("SELECT paid_amount FROM reservation_payments WHERE reservation_id = ?1")?;
        let amounts = stmt
            .query_map([reservation_id], |row| row.get::<_, Money>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Money::checked_sum(amounts).ok_or_else(|| out_of_range("paid_amount"))
    }

    /// Sum of all payments received in `[from, to)`.
    ///
    /// Amounts are summed as decimals outside SQL so no float rounding
    /// creeps in.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn sum_payments_between(
        conn: &Connection,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Money> {
        let mut stmt = conn.prepare(
            "SELECT paid_amount FROM reservation_payments WHERE paid_at >= ?1 AND paid_at < ?2",
        )?;
        let amounts = stmt
            .query_map(
                params![datetime_to_unix_secs(from), datetime_to_unix_secs(to)],
                |row| row.get::<_, Money>(0),
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Money::checked_sum(amounts).ok_or_else(|| out_of_range("paid_amount"))
    }
}
