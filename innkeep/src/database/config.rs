//! Database configuration and path resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable that relocates the data directory.
pub const DATA_DIR_ENV: &str = "INNKEEP_DATA_DIR";

/// File name of the store inside the data directory.
pub const DATABASE_FILE_NAME: &str = "innkeep.db";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use innkeep::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/innkeep.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long a writer waits for the lock before failing.
    pub busy_timeout: Duration,
    /// Create the file and parent directory when missing.
    pub auto_create: bool,
    /// Open without write access.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a configuration with a 5 second busy timeout and auto-create on.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_secs(5),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Disables creation of a missing database.
    #[must_use]
    pub fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Opens read-only; implies no auto-create.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }

    /// The busy timeout in whole seconds, as reported by lock timeouts.
    #[must_use]
    pub fn busy_timeout_secs(&self) -> u64 {
        self.busy_timeout.as_secs()
    }
}

/// Returns `~/.innkeep`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".innkeep"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the data directory: `INNKEEP_DATA_DIR`, else [`default_data_dir`].
///
/// # Errors
///
/// Returns an error if neither source yields a directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the database file path inside [`resolve_data_dir`].
///
/// # Errors
///
/// Returns an error if the data directory cannot be resolved.
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(DATABASE_FILE_NAME))
}
