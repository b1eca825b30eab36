//! Database connection management.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// An open store.
///
/// Each worker owns its own `Database`; SQLite's WAL mode lets readers run
/// alongside the single writer.
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens the database described by `config`.
    ///
    /// Creates the parent directory when `auto_create` is set, enables WAL,
    /// `synchronous = NORMAL`, the busy timeout and foreign keys, then
    /// initializes or verifies the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, a PRAGMA fails, or the
    /// schema version is not supported.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // journal_mode returns the resulting mode as a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;

        if config.read_only {
            let version = super::migrations::get_schema_version(&conn)?;
            if version != super::schema::CURRENT_SCHEMA_VERSION {
                return Err(crate::Error::UnsupportedSchemaVersion {
                    expected: super::schema::CURRENT_SCHEMA_VERSION,
                    found: version,
                });
            }
        } else {
            super::migrations::check_schema_compatibility(&conn)?;
        }

        log::debug!("opened database {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Returns the underlying connection for read-only queries.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the underlying connection mutably.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// The configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open_sets_pragmas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");

        let foreign_keys: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_database_auto_create_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("test.db");
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_missing_without_auto_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let result = Database::open(DatabaseConfig::new(&path).without_auto_create());
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_database_read_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        let result = db
            .connection()
            .execute("INSERT INTO guests (full_name, contact_number) VALUES ('a', '1')", []);
        assert!(result.is_err());
    }
}
