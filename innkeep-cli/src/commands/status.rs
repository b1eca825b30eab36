//! Status command implementation.

use crate::error::CliError;
use crate::utils::{find_reservation, load_configuration, notify, open_database, GlobalOptions};
use clap::Args;
use innkeep::ReservationManager;
use std::io::Write;

/// Set the status of a reservation.
#[derive(Args)]
pub struct StatusCommand {
    /// Reservation number or id
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// PENDING, CONFIRMED, CHECKED_IN, CANCELLED or CHECKED_OUT
    #[arg(value_name = "STATUS")]
    pub status: String,
}

impl StatusCommand {
    /// Execute the status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let reservation = find_reservation(db.connection(), &self.reservation)?;

        let updated =
            ReservationManager::new(&mut db, &config).update_status(reservation.id, &self.status)?;

        writeln!(std::io::stdout(), "{}", updated.status)?;
        notify(
            global,
            &format!("{}: {} -> {}", updated.number, reservation.status, updated.status),
        );

        Ok(())
    }
}
