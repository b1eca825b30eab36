//! Guests command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, write_records, GlobalOptions};
use clap::Args;
use innkeep::{Database, OutputFormat};

/// List known guests, for use with `list --guest` and `--guest-id`.
#[derive(Args)]
pub struct GuestsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl GuestsCommand {
    /// Execute the guests command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let guests = Database::list_guests(db.connection())?;
        write_records(self.format, &guests)
    }
}
