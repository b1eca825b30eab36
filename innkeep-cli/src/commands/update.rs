//! Update command implementation.
//!
//! Changes to the room or dates are re-checked for conflicts and re-priced
//! against the room's current rate. Guest options move the booking to
//! another guest, found or created the same way `reserve` does.

use crate::error::CliError;
use crate::utils::{
    find_reservation, find_room, load_configuration, notify, open_database, write_record,
    GlobalOptions,
};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{GuestDetails, GuestRef, Money, OutputFormat, ReservationManager, UpdateReservation};
use rust_decimal::Decimal;

/// Change dates, room, guest, status, notes or pricing of a reservation.
#[derive(Args)]
pub struct UpdateCommand {
    /// Reservation number or id
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// Move to another room (room number)
    #[arg(long, value_name = "NUMBER")]
    pub room: Option<String>,

    /// New first night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: Option<NaiveDate>,

    /// New departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: Option<NaiveDate>,

    /// Rebook for an existing guest id
    #[arg(long, value_name = "ID", conflicts_with_all = ["guest_name", "contact", "email"])]
    pub guest_id: Option<i64>,

    /// Rebook for a guest by name (matched or created with --contact)
    #[arg(long, value_name = "NAME", requires = "contact")]
    pub guest_name: Option<String>,

    /// Contact number for --guest-name
    #[arg(long, value_name = "PHONE", requires = "guest_name")]
    pub contact: Option<String>,

    /// E-mail for --guest-name
    #[arg(long, value_name = "EMAIL", requires = "guest_name")]
    pub email: Option<String>,

    /// New status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Replace the notes; an empty value clears them
    #[arg(long)]
    pub notes: Option<String>,

    /// Tax rate in percent
    #[arg(long, value_name = "PERCENT")]
    pub tax_rate: Option<Decimal>,

    /// Discount amount
    #[arg(long, value_name = "AMOUNT")]
    pub discount: Option<Money>,

    /// Output format for the updated reservation
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let reservation = find_reservation(db.connection(), &self.reservation)?;

        let room_id = match self.room {
            Some(ref number) => Some(find_room(db.connection(), number)?.id),
            None => None,
        };

        let guest = match (self.guest_id, self.guest_name, self.contact) {
            (Some(guest_id), _, _) => Some(GuestRef::Existing(guest_id)),
            (None, Some(name), Some(contact)) => {
                let mut details = GuestDetails::new(name, contact);
                if let Some(email) = self.email {
                    details = details.with_email(email);
                }
                Some(GuestRef::Details(details))
            }
            _ => None,
        };

        let changes = UpdateReservation {
            room_id,
            check_in: self.check_in,
            check_out: self.check_out,
            status: self.status,
            notes: self.notes,
            tax_rate: self.tax_rate,
            discount: self.discount,
            guest,
        };

        let updated = ReservationManager::new(&mut db, &config).update(reservation.id, changes)?;

        write_record(self.format, &updated)?;
        notify(
            global,
            &format!("Updated {} (total {})", updated.number, updated.total),
        );

        Ok(())
    }
}
