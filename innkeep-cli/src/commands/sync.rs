//! Sync command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, notify, open_database, write_records, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::operations::sync_all_rooms;
use innkeep::{Clock, OutputFormat};

/// Re-derive every room's displayed status.
#[derive(Args)]
pub struct SyncCommand {
    /// Evaluate as of this date instead of today (UTC)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Only report rooms whose status changed
    #[arg(long)]
    pub changed_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl SyncCommand {
    /// Execute the sync command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let today = self.date.unwrap_or_else(|| Clock::System.today());

        let mut synced = db.with_transaction(|tx| sync_all_rooms(tx, today))?;
        let changed = synced.iter().filter(|s| s.changed()).count();
        if self.changed_only {
            synced.retain(|s| s.changed());
        }

        write_records(self.format, &synced)?;
        notify(global, &format!("Synced rooms as of {today}, {changed} changed"));

        Ok(())
    }
}
