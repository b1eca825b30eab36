//! Rendering of reservations, rooms, payments and reports.
//!
//! Records implement [`Tabular`] for row-oriented formats and
//! `serde::Serialize` for JSON, so every format is built from the same
//! structured values rather than ad-hoc strings.

mod formatters;

use serde::Serialize;

use crate::Result;

pub use formatters::{JsonFormatter, TableFormatter};

/// A record with a fixed set of named columns.
pub trait Tabular {
    /// Column names, lowercase.
    fn headers() -> &'static [&'static str];

    /// Cell values in header order. Missing values are empty strings.
    fn row(&self) -> Vec<String>;
}

/// Formats a list of records.
pub trait OutputFormatter<T> {
    /// Renders `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, records: &[T]) -> Result<String>;
}

/// Output formats offered to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table with an uppercase header.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

impl OutputFormat {
    /// Renders records as a table or JSON.
    ///
    /// CSV needs a proper quoting writer and is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails, or a validation error
    /// when asked for CSV.
    pub fn render<T: Tabular + Serialize>(self, records: &[T]) -> Result<String> {
        match self {
            Self::Table => TableFormatter.format(records),
            Self::Json => JsonFormatter.format(records),
            Self::Csv => Err(crate::Error::validation(
                "format",
                "csv output is written by a csv writer",
            )),
        }
    }
}
