//! SQLite store for rooms, guests, reservations and payments.
//!
//! Query helpers are associated functions taking a `&Connection`, so the
//! same call works on a plain connection or inside a transaction opened
//! with [`Database::begin_transaction`].
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::database::{Database, DatabaseConfig};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! for room in Database::list_rooms(db.connection()).unwrap() {
//!     println!("{} {}", room.room_number, room.status);
//! }
//! ```

mod config;
mod connection;
mod guests;
pub mod migrations;
mod payments;
mod reservations;
mod rooms;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
