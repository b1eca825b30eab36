//! Reconcile command implementation.
//!
//! Recomputes `amount_paid` from the recorded payments, for one reservation
//! or for all of them.

use crate::error::CliError;
use crate::utils::{
    find_reservation, load_configuration, notify, open_database, write_records, GlobalOptions,
};
use clap::Args;
use innkeep::{Database, OutputFormat, PaymentLedger};

/// Recompute amounts paid from recorded payments.
#[derive(Args)]
pub struct ReconcileCommand {
    /// Reservation number or id
    #[arg(value_name = "RESERVATION", required_unless_present = "all")]
    pub reservation: Option<String>,

    /// Reconcile every reservation
    #[arg(long, conflicts_with = "reservation")]
    pub all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl ReconcileCommand {
    /// Execute the reconcile command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let ids: Vec<i64> = match self.reservation {
            Some(ref key) => vec![find_reservation(db.connection(), key)?.id],
            None => Database::list_all_reservations(db.connection())?
                .into_iter()
                .map(|r| r.id)
                .collect(),
        };

        let mut ledger = PaymentLedger::new(&mut db);
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            results.push(ledger.reconcile(id)?);
        }

        let changed = results.iter().filter(|r| r.changed()).count();
        write_records(self.format, &results)?;
        notify(
            global,
            &format!("Reconciled {} reservation(s), {changed} corrected", results.len()),
        );

        Ok(())
    }
}
