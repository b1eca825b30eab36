//! Database schema management and migrations.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_CREATED_AT_INDEX, CREATE_GUESTS_TABLE, CREATE_METADATA_TABLE,
    CREATE_PAYMENTS_PAID_AT_INDEX, CREATE_PAYMENTS_RESERVATION_INDEX, CREATE_PAYMENTS_TABLE,
    CREATE_RESERVATIONS_TABLE, CREATE_ROOMS_TABLE, CREATE_ROOM_DATES_INDEX,
    CREATE_SEQUENCES_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Creates all tables, indices and the version row for a fresh database.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use innkeep::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    conn.execute(CREATE_ROOMS_TABLE, [])?;
    conn.execute(CREATE_GUESTS_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;
    conn.execute(CREATE_PAYMENTS_TABLE, [])?;
    conn.execute(CREATE_SEQUENCES_TABLE, [])?;

    conn.execute(CREATE_ROOM_DATES_INDEX, [])?;
    conn.execute(CREATE_CREATED_AT_INDEX, [])?;
    conn.execute(CREATE_PAYMENTS_RESERVATION_INDEX, [])?;
    conn.execute(CREATE_PAYMENTS_PAID_AT_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns `Ok(0)` when the metadata table is missing or holds no version.
///
/// # Errors
///
/// Returns an error for any other database failure.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value.parse::<i32>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility, initializing a fresh database.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the stored version differs
/// from [`CURRENT_SCHEMA_VERSION`], or a database error if initialization
/// fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        log::debug!("initializing schema version {CURRENT_SCHEMA_VERSION}");
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_connection() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_initialize_schema_creates_tables() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        for table in [
            "rooms",
            "guests",
            "reservations",
            "reservation_payments",
            "reservation_sequences",
        ] {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })
                .unwrap();
            assert_eq!(count, 0, "{table} should start empty");
        }
    }

    #[test]
    fn test_get_schema_version_uninitialized() {
        let conn = create_test_connection();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_check_schema_compatibility_fresh_then_current() {
        let conn = create_test_connection();
        check_schema_compatibility(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
        check_schema_compatibility(&conn).unwrap();
    }

    #[test]
    fn test_check_schema_compatibility_newer_version() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();

        let err = check_schema_compatibility(&conn).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedSchemaVersion {
                expected: CURRENT_SCHEMA_VERSION,
                found: 999
            }
        ));
    }

    #[test]
    fn test_schema_creates_all_indices() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        let index_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(index_count, 4);
    }

    #[test]
    fn test_checkout_must_follow_checkin() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO rooms (room_number, room_type, rate_per_night, max_guests) \
             VALUES ('101', 'Std', '100', 2)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO guests (full_name, contact_number) VALUES ('A', '1')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO reservations (reservation_number, guest_id, room_id, check_in_date, \
             check_out_date, status, nights, rate_per_night, subtotal, tax_rate, tax, discount, \
             total_amount, amount_paid, payment_status, created_by, created_at) \
             VALUES ('RES-20260210-001', 1, 1, '2026-02-10', '2026-02-10', 'PENDING', 0, '100', \
             '0', '0', '0', '0', '0', '0', 'UNPAID', 1, 0)",
            [],
        );
        assert!(result.is_err());
    }
}
