//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{find_reservation, load_configuration, notify, open_database, GlobalOptions};
use clap::Args;
use innkeep::ReservationManager;

/// Delete a reservation and its payments.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation number or id
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let reservation = find_reservation(db.connection(), &self.reservation)?;

        if self.dry_run {
            notify(
                global,
                &format!(
                    "Dry run - would delete {} ({} paid)",
                    reservation.number, reservation.amount_paid
                ),
            );
            return Ok(());
        }

        let deleted = ReservationManager::new(&mut db, &config).delete(reservation.id)?;
        notify(global, &format!("Deleted reservation {}", deleted.number));

        Ok(())
    }
}
