//! CLI-specific error types with exit codes.
//!
//! Library errors are wrapped and classified so scripts can tell a booking
//! clash from a bad argument without parsing messages.

use std::fmt;

use innkeep::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Data directory not found (and auto-init disabled).
    NoDataDirectory,

    /// Configuration error.
    Config(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Conflict (overlapping stay, overpayment, room in use)
    /// - 2: Timeout waiting for database lock
    /// - 3: No data directory found
    /// - 4: Invalid arguments or failed validation
    /// - 5: I/O error
    /// - 6: Other store error
    /// - 7: Configuration error
    /// - 8: Record not found
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::Conflict { .. } => 1,
                LibError::LockTimeout { .. } => 2,
                LibError::Validation { .. } => 4,
                LibError::Io(_) => 5,
                LibError::Configuration(_) => 7,
                LibError::NotFound { .. } => 8,
                _ => 6,
            },
            CliError::Timeout => 2,
            CliError::NoDataDirectory => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout => write!(f, "Timeout waiting for database lock"),
            CliError::NoDataDirectory => {
                write!(
                    f,
                    "Data directory not found (use --data-dir or enable auto-init)"
                )
            }
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        if matches!(e, LibError::LockTimeout { .. }) {
            CliError::Timeout
        } else {
            CliError::Library(e)
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_errors_map_to_distinct_codes() {
        assert_eq!(CliError::from(LibError::conflict("overlap")).exit_code(), 1);
        assert_eq!(
            CliError::from(LibError::validation("amount", "must be positive")).exit_code(),
            4
        );
        assert_eq!(CliError::from(LibError::not_found("room 9")).exit_code(), 8);
    }

    #[test]
    fn test_lock_timeout_becomes_timeout() {
        let err = CliError::from(LibError::LockTimeout { seconds: 5 });
        assert!(matches!(err, CliError::Timeout));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_cli_side_codes() {
        assert_eq!(CliError::NoDataDirectory.exit_code(), 3);
        assert_eq!(CliError::InvalidArguments("x".into()).exit_code(), 4);
        assert_eq!(CliError::Config("x".into()).exit_code(), 7);
    }
}
