//! Shared test utilities for database unit tests.

use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::{GuestDetails, Money, RoomSpec};

/// Creates a temporary test database that lives for the rest of the test.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the database's lifetime
    std::mem::forget(dir);

    db
}

/// Inserts a room with the given number and nightly rate, returning its id.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn insert_test_room(conn: &Connection, number: &str, rate: &str) -> i64 {
    let rate: Money = rate.parse().unwrap();
    let spec = RoomSpec::new(number, "Standard", rate).with_max_guests(2);
    Database::insert_room(conn, &spec.validate().unwrap()).unwrap()
}

/// Inserts a guest, returning its id.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn insert_test_guest(conn: &Connection, name: &str, contact: &str) -> i64 {
    let details = GuestDetails::new(name, contact).validate().unwrap();
    Database::insert_guest(conn, &details).unwrap()
}
