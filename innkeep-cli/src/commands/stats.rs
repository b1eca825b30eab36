//! Stats command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, write_json, write_records, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::operations::dashboard_stats;
use innkeep::{Clock, OutputFormat};
use std::io::Write;

/// Show dashboard statistics.
#[derive(Args)]
pub struct StatsCommand {
    /// Length of the daily series (default: configured window)
    #[arg(long, value_name = "DAYS", default_value_t = 0)]
    pub days: i64,

    /// Report as of this date instead of today (UTC)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Output format (csv prints the daily series only)
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let today = self.date.unwrap_or_else(|| Clock::System.today());

        let stats = dashboard_stats(db.connection(), self.days, today, &config)?;

        match self.format {
            OutputFormat::Json => write_json(&stats),
            OutputFormat::Csv => write_records(OutputFormat::Csv, &stats.series),
            OutputFormat::Table => {
                {
                    let stdout = std::io::stdout();
                    let mut handle = stdout.lock();
                    writeln!(handle, "Total reservations: {}", stats.total_reservations)?;
                    writeln!(
                        handle,
                        "Revenue this month: {} {}",
                        stats.revenue_this_month,
                        config.currency()
                    )?;
                    writeln!(handle)?;
                }
                write_records(OutputFormat::Table, &stats.series)
            }
        }
    }
}
