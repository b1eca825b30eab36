//! Guest rows.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::{Guest, GuestDetails};

use super::connection::Database;

const GUEST_COLUMNS: &str = "guest_id, full_name, email, contact_number";

fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        contact_number: row.get(3)?,
    })
}

impl Database {
    /// Inserts a guest, returning its id.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub fn insert_guest(conn: &Connection, details: &GuestDetails) -> Result<i64> {
        conn.execute(
            "INSERT INTO guests (full_name, email, contact_number) VALUES (?1, ?2, ?3)",
            params![details.full_name, details.email, details.contact_number],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Loads a guest by id.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn get_guest(conn: &Connection, guest_id: i64) -> Result<Option<Guest>> {
        let guest = conn
            .query_row(
                &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE guest_id = ?1"),
                [guest_id],
                row_to_guest,
            )
            .optional()?;
        Ok(guest)
    }

    /// Finds the oldest guest with this contact number.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn find_guest_by_contact(conn: &Connection, contact_number: &str) -> Result<Option<Guest>> {
        let guest = conn
            .query_row(
                &format!(
                    "SELECT {GUEST_COLUMNS} FROM guests WHERE contact_number = ?1 \
                     ORDER BY guest_id LIMIT 1"
                ),
                [contact_number],
                row_to_guest,
            )
            .optional()?;
        Ok(guest)
    }

    /// Finds the oldest guest with this e-mail, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn find_guest_by_email(conn: &Connection, email: &str) -> Result<Option<Guest>> {
        let guest = conn
            .query_row(
                &format!(
                    "SELECT {GUEST_COLUMNS} FROM guests WHERE lower(email) = lower(?1) \
                     ORDER BY guest_id LIMIT 1"
                ),
                [email],
                row_to_guest,
            )
            .optional()?;
        Ok(guest)
    }

    /// Lists guests ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_guests(conn: &Connection) -> Result<Vec<Guest>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests ORDER BY full_name, guest_id"
        ))?;
        let guests = stmt
            .query_map([], row_to_guest)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(guests)
    }
}
