//! Refund command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, notify, open_database, GlobalOptions};
use clap::Args;
use innkeep::{Error, PaymentLedger};

/// Remove a recorded payment.
#[derive(Args)]
pub struct RefundCommand {
    /// Payment id as printed by `pay`
    #[arg(value_name = "PAYMENT_ID")]
    pub payment_id: i64,
}

impl RefundCommand {
    /// Execute the refund command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if !PaymentLedger::new(&mut db).delete_payment(self.payment_id)? {
            return Err(Error::not_found(format!("payment {}", self.payment_id)).into());
        }

        notify(global, &format!("Removed payment {}", self.payment_id));
        Ok(())
    }
}
