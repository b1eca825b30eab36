//! Logging infrastructure for the innkeep library.
//!
//! Library code logs through the `log` facade (`log::debug!`, `log::info!`,
//! `log::warn!`). This module provides the stderr backend the CLI installs,
//! with three verbosity levels.

use std::env;
use std::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Environment variable consulted when no CLI flag picks a level.
pub const LOG_MODE_ENV: &str = "INNKEEP_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use innkeep::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Everything, including info and debug records.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not one of quiet/normal/verbose.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` crate filter matching this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// A stderr logger for the `log` facade.
///
/// # Examples
///
/// ```
/// use innkeep::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.enabled_for(log::Level::Warn));
/// assert!(!logger.enabled_for(log::Level::Info));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns `true` if records at `level` would be written.
    #[must_use]
    pub fn enabled_for(&self, level: Level) -> bool {
        level <= self.level.filter()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.enabled_for(metadata.level())
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Resolves the log level from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (`verbose` wins over `quiet`)
/// 2. `INNKEEP_LOG_MODE`
/// 3. Normal
#[must_use]
pub fn resolve_level(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        return LogLevel::Verbose;
    }
    if quiet {
        return LogLevel::Quiet;
    }
    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .unwrap_or(LogLevel::Normal)
}

/// Resolves the level and installs a [`Logger`] as the global `log` backend.
///
/// Calling this more than once keeps the first backend but still updates
/// the global max level.
///
/// # Examples
///
/// ```
/// use innkeep::{init_logger, LogLevel};
///
/// let logger = init_logger(false, true);
/// assert_eq!(logger.level(), LogLevel::Quiet);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let logger = Logger::new(resolve_level(verbose, quiet));
    // A second install fails harmlessly; the level below still applies.
    let _ = log::set_boxed_logger(Box::new(logger));
    log::set_max_level(logger.level().filter());
    logger
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_log_mode<F: FnOnce()>(value: Option<&str>, f: F) {
        let saved = env::var(LOG_MODE_ENV).ok();
        match value {
            Some(v) => env::set_var(LOG_MODE_ENV, v),
            None => env::remove_var(LOG_MODE_ENV),
        }
        f();
        match saved {
            Some(v) => env::set_var(LOG_MODE_ENV, v),
            None => env::remove_var(LOG_MODE_ENV),
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Quiet.to_string(), "quiet");
        assert_eq!(LogLevel::Verbose.to_string(), "verbose");
    }

    #[test]
    fn test_log_level_filters() {
        assert_eq!(LogLevel::Quiet.filter(), LevelFilter::Off);
        assert_eq!(LogLevel::Normal.filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Verbose.filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_logger_enabled_for() {
        let quiet = Logger::new(LogLevel::Quiet);
        assert!(!quiet.enabled_for(Level::Error));

        let verbose = Logger::new(LogLevel::Verbose);
        assert!(verbose.enabled_for(Level::Debug));
        assert!(!verbose.enabled_for(Level::Trace));
    }

    #[test]
    #[serial]
    fn test_resolve_level_defaults_to_normal() {
        with_log_mode(None, || {
            assert_eq!(resolve_level(false, false), LogLevel::Normal);
        });
    }

    #[test]
    #[serial]
    fn test_resolve_level_from_env() {
        with_log_mode(Some("verbose"), || {
            assert_eq!(resolve_level(false, false), LogLevel::Verbose);
        });
        with_log_mode(Some("garbage"), || {
            assert_eq!(resolve_level(false, false), LogLevel::Normal);
        });
    }

    #[test]
    #[serial]
    fn test_flags_override_env() {
        with_log_mode(Some("quiet"), || {
            assert_eq!(resolve_level(true, false), LogLevel::Verbose);
            assert_eq!(resolve_level(true, true), LogLevel::Verbose);
        });
        with_log_mode(Some("verbose"), || {
            assert_eq!(resolve_level(false, true), LogLevel::Quiet);
        });
    }

    #[test]
    #[serial]
    fn test_init_logger_is_repeatable() {
        let first = init_logger(false, true);
        let second = init_logger(true, false);
        assert_eq!(first.level(), LogLevel::Quiet);
        assert_eq!(second.level(), LogLevel::Verbose);
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
