//! Error types for the innkeep library.
//!
//! This module provides the error hierarchy shared by every operation in
//! the library, using `thiserror` for ergonomic error handling. Each
//! variant belongs to one [`ErrorKind`], which is what callers (the CLI,
//! a request handler) branch on.

use thiserror::Error;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing input.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A request that is well-formed but collides with existing state.
    #[error("conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, rejected before anything was persisted.
    Validation,
    /// Overlapping booking, overpayment, duplicate business key.
    Conflict,
    /// A referenced record does not exist.
    NotFound,
    /// The store failed; the operation was rolled back.
    Store,
}

impl Error {
    /// Shorthand for a [`Error::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::Conflict`].
    pub fn conflict(details: impl Into<String>) -> Self {
        Self::Conflict {
            details: details.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`].
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Returns the classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Error, ErrorKind};
    ///
    /// let err = Error::conflict("room 101 is booked");
    /// assert_eq!(err.kind(), ErrorKind::Conflict);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Io(_)
            | Self::LockTimeout { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Store,
        }
    }

    /// Check if error indicates a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if error is a conflict rejection.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// Check if error is a validation rejection.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Maps a `SQLITE_BUSY` failure to [`Error::LockTimeout`].
    ///
    /// Any other error is returned unchanged.
    #[must_use]
    pub fn from_busy(err: rusqlite::Error, timeout_secs: u64) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref sqlite_err, _)
                if sqlite_err.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                Self::LockTimeout {
                    seconds: timeout_secs,
                }
            }
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::validation("check_out_date", "must be after check-in");
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("check_out_date"));
        assert!(display.contains("must be after check-in"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_conflict_error() {
        let err = Error::conflict("selected dates overlap with an existing reservation");
        let display = format!("{err}");
        assert!(display.contains("conflict"));
        assert!(display.contains("overlap"));
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::not_found("reservation 42");
        let display = format!("{err}");
        assert!(display.contains("not found"));
        assert!(display.contains("reservation 42"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_lock_timeout_error() {
        let err = Error::LockTimeout { seconds: 5 };
        let display = format!("{err}");
        assert!(display.contains("lock timeout"));
        assert!(display.contains('5'));
        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("unsupported schema version"));
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[test]
    fn test_from_busy_maps_lock_timeout() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        let err = Error::from_busy(busy, 7);
        assert!(matches!(err, Error::LockTimeout { seconds: 7 }));

        let other = Error::from_busy(rusqlite::Error::QueryReturnedNoRows, 7);
        assert!(matches!(other, Error::Database(_)));
    }
}
