//! Room rows.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::{Room, RoomSpec, RoomStatus};

use super::connection::Database;

const ROOM_COLUMNS: &str =
    "room_id, room_number, room_type, rate_per_night, max_guests, status, description, image_url";

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        room_number: row.get(1)?,
        room_type: row.get(2)?,
        rate_per_night: row.get(3)?,
        max_guests: row.get(4)?,
        status: row.get(5)?,
        description: row.get(6)?,
        image_url: row.get(7)?,
    })
}

impl Database {
    /// Inserts a validated room with status AVAILABLE, returning its id.
    ///
    /// # Errors
    ///
    /// Returns a database error, including a UNIQUE violation on a duplicate
    /// room number.
    pub fn insert_room(conn: &Connection, spec: &RoomSpec) -> Result<i64> {
        conn.execute(
            "INSERT INTO rooms (room_number, room_type, rate_per_night, max_guests, status, \
             description, image_url) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                spec.room_number,
                spec.room_type,
                spec.rate_per_night,
                spec.max_guests,
                RoomStatus::Available,
                spec.description,
                spec.image_url,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Replaces a room's descriptive fields. Status is left alone.
    ///
    /// Returns `false` if no such room exists.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn update_room(conn: &Connection, room_id: i64, spec: &RoomSpec) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE rooms SET room_number = ?1, room_type = ?2, rate_per_night = ?3, \
             max_guests = ?4, description = ?5, image_url = ?6 WHERE room_id = ?7",
            params![
                spec.room_number,
                spec.room_type,
                spec.rate_per_night,
                spec.max_guests,
                spec.description,
                spec.image_url,
                room_id,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Writes a room's status.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn set_room_status(conn: &Connection, room_id: i64, status: RoomStatus) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE rooms SET status = ?1 WHERE room_id = ?2",
            params![status, room_id],
        )?;
        Ok(rows > 0)
    }

    /// Deletes a room row.
    ///
    /// # Errors
    ///
    /// Returns a database error, including a foreign-key violation while
    /// reservations still reference the room.
    pub fn delete_room(conn: &Connection, room_id: i64) -> Result<bool> {
        let rows = conn.execute("DELETE FROM rooms WHERE room_id = ?1", [room_id])?;
        Ok(rows > 0)
    }

    /// Loads a room by id.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn get_room(conn: &Connection, room_id: i64) -> Result<Option<Room>> {
        let room = conn
            .query_row(
                &format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE room_id = ?1"),
                [room_id],
                row_to_room,
            )
            .optional()?;
        Ok(room)
    }

    /// Loads a room by its room number.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn get_room_by_number(conn: &Connection, room_number: &str) -> Result<Option<Room>> {
        let room = conn
            .query_row(
                &format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE room_number = ?1"),
                [room_number],
                row_to_room,
            )
            .optional()?;
        Ok(room)
    }

    /// Lists every room ordered by room number.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY room_number"
        ))?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Lists every room id.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_room_ids(conn: &Connection) -> Result<Vec<i64>> {
        let mut stmt = conn.prepare("SELECT room_id FROM rooms ORDER BY room_id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(ids)
    }

    /// Returns `true` if another room already uses `room_number`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn room_number_taken(
        conn: &Connection,
        room_number: &str,
        exclude_room_id: Option<i64>,
    ) -> Result<bool> {
        let taken = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM rooms WHERE room_number = ?1 \
             AND (?2 IS NULL OR room_id <> ?2))",
            params![room_number, exclude_room_id],
            |row| row.get(0),
        )?;
        Ok(taken)
    }
}
