//! Shared database test utilities.

use std::path::{Path, PathBuf};
use std::time::Duration;

use innkeep::database::{Database, DatabaseConfig};
use innkeep::{Money, Room, RoomCatalog, RoomSpec};

/// Creates a temporary test database that lives for the rest of the test.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let path = create_test_database_path();
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Creates an initialized database file and returns its path, so several
/// handles can be opened on it.
#[allow(dead_code)]
pub fn create_test_database_path() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    drop(Database::open(DatabaseConfig::new(&path)).unwrap());

    // Keep the directory alive for the rest of the test
    std::mem::forget(dir);
    path
}

/// Opens another handle on an existing database with a generous busy
/// timeout, as a separate worker would.
#[allow(dead_code)]
pub fn open_worker(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path).with_busy_timeout(Duration::from_secs(30))).unwrap()
}

/// Adds a room through the catalogue.
#[allow(dead_code)]
pub fn add_room(db: &mut Database, number: &str, rate: Money) -> Room {
    RoomCatalog::new(db)
        .create_room(&RoomSpec::new(number, "Standard", rate).with_max_guests(2))
        .unwrap()
}
