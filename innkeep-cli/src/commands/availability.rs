//! Availability command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, write_records, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::operations::list_availability;
use innkeep::{OutputFormat, StayDates};

/// Show which rooms can take a stay.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// First night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,

    /// Only show rooms that are free
    #[arg(long)]
    pub available_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stay = StayDates::new(self.check_in, self.check_out)?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut rooms = list_availability(db.connection(), &stay)?;
        if self.available_only {
            rooms.retain(|room| room.is_available());
        }

        write_records(self.format, &rooms)
    }
}
