//! Show command implementation.

use crate::error::CliError;
use crate::utils::{find_reservation, load_configuration, open_database, write_record, GlobalOptions};
use clap::Args;
use innkeep::OutputFormat;

/// Show one reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation number or id
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let reservation = find_reservation(db.connection(), &self.reservation)?;

        write_record(self.format, &reservation)
    }
}
