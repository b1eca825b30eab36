//! Pay command implementation.
//!
//! Records a payment and prints its id. Overpayments and payments against
//! settled reservations are refused with a conflict.

use crate::error::CliError;
use crate::utils::{find_reservation, load_configuration, notify, open_database, GlobalOptions};
use clap::Args;
use innkeep::{Database, Money, NewPayment, PaymentLedger};
use std::io::Write;

/// Record a payment against a reservation.
#[derive(Args)]
pub struct PayCommand {
    /// Reservation number or id
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// Amount received
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Money,

    /// Payment method, e.g. CASH or CARD
    #[arg(long, value_name = "METHOD")]
    pub method: Option<String>,

    /// Free-text note
    #[arg(long)]
    pub note: Option<String>,

    /// Id of the user recording the payment
    #[arg(long, value_name = "ID", default_value_t = 1, env = "INNKEEP_USER_ID")]
    pub created_by: i64,
}

impl PayCommand {
    /// Execute the pay command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let reservation = find_reservation(db.connection(), &self.reservation)?;

        let mut payment = NewPayment::new(reservation.id, self.amount, self.created_by);
        if let Some(method) = self.method {
            payment = payment.with_method(method);
        }
        if let Some(note) = self.note {
            payment = payment.with_note(note);
        }

        let payment_id = PaymentLedger::new(&mut db).add_payment(payment)?;
        writeln!(std::io::stdout(), "{payment_id}")?;

        if let Some(updated) = Database::get_reservation(db.connection(), reservation.id)? {
            notify(
                global,
                &format!(
                    "{}: paid {} of {} ({}), balance {}",
                    updated.number,
                    updated.amount_paid,
                    updated.total,
                    updated.payment_status,
                    updated.balance()
                ),
            );
        }

        Ok(())
    }
}
