//! Payments command implementation.

use crate::error::CliError;
use crate::utils::{find_reservation, load_configuration, open_database, write_records, GlobalOptions};
use clap::Args;
use innkeep::{OutputFormat, PaymentLedger};

/// Show the payment history of a reservation.
#[derive(Args)]
pub struct PaymentsCommand {
    /// Reservation number or id
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl PaymentsCommand {
    /// Execute the payments command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let reservation = find_reservation(db.connection(), &self.reservation)?;

        let history = PaymentLedger::new(&mut db).payment_history(reservation.id)?;
        write_records(self.format, &history)
    }
}
