//! Utility functions for CLI operations.
//!
//! This module provides the helpers every command shares: configuration
//! loading, database opening, lookups by user-facing keys, and output.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use rusqlite::Connection;
use serde::Serialize;

use crate::error::CliError;
use innkeep::database::{default_data_dir, DATABASE_FILE_NAME};
use innkeep::{
    Config, ConfigBuilder, Database, DatabaseConfig, Error, OutputFormat, Reservation, Room,
    Tabular,
};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir`/`INNKEEP_DATA_DIR`, else `~/.innkeep`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.clone());
    }
    default_data_dir().map_err(|e| CliError::Config(e.to_string()))
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. `config.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_data_dir(resolve_data_dir(global)?);

    if let Some(timeout_seconds) = global.busy_timeout {
        builder = builder.with_busy_timeout(timeout_seconds.into());
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    let mut db_config = DatabaseConfig::new(&db_path)
        .with_busy_timeout(Duration::from_secs(config.busy_timeout_seconds()));

    if global.disable_autoinit {
        if !db_path.exists() {
            return Err(CliError::NoDataDirectory);
        }
        db_config = db_config.without_auto_create();
    }

    log::debug!("using database {}", db_path.display());
    Database::open(db_config).map_err(CliError::from)
}

/// Look up a room by its room number.
pub fn find_room(conn: &Connection, room_number: &str) -> Result<Room, CliError> {
    Database::get_room_by_number(conn, room_number.trim())?
        .ok_or_else(|| Error::not_found(format!("room {room_number}")).into())
}

/// Look up a reservation by number (`RES-...`) or numeric id.
pub fn find_reservation(conn: &Connection, key: &str) -> Result<Reservation, CliError> {
    let key = key.trim();
    let found = if key.to_uppercase().starts_with("RES-") {
        Database::get_reservation_by_number(conn, &key.to_uppercase())?
    } else {
        let id: i64 = key.parse().map_err(|_| {
            CliError::InvalidArguments(format!(
                "'{key}' is neither a reservation number nor an id"
            ))
        })?;
        Database::get_reservation(conn, id)?
    };
    found.ok_or_else(|| Error::not_found(format!("reservation {key}")).into())
}

/// Write a list of records to stdout in the requested format.
pub fn write_records<T: Tabular + Serialize>(
    format: OutputFormat,
    records: &[T],
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if format == OutputFormat::Csv {
        let mut writer = csv::Writer::from_writer(handle);
        writer.write_record(T::headers())?;
        for record in records {
            writer.write_record(record.row())?;
        }
        writer.flush()?;
        return Ok(());
    }

    let rendered = format.render(records)?;
    writeln!(handle, "{rendered}")?;
    Ok(())
}

/// Write a single record; JSON output is an object rather than an array.
pub fn write_record<T: Tabular + Serialize>(
    format: OutputFormat,
    record: &T,
) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        write_json(record)
    } else {
        write_records(format, std::slice::from_ref(record))
    }
}

/// Write any serializable value as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)
        .map_err(|e| CliError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
    writeln!(handle)?;
    Ok(())
}

/// Print a status line to stderr unless `--quiet` was given.
pub fn notify(global: &GlobalOptions, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}
