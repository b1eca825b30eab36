//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books a room for a
//! guest over a date range and prints the new reservation number.

use crate::error::CliError;
use crate::utils::{find_room, load_configuration, notify, open_database, write_json, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{CreateReservation, GuestDetails, Money, OutputFormat, ReservationManager};
use rust_decimal::Decimal;
use std::io::Write;

/// Create a reservation.
#[derive(Args)]
pub struct ReserveCommand {
    /// Room number
    #[arg(long, value_name = "NUMBER")]
    pub room: String,

    /// First night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,

    /// Existing guest id
    #[arg(long, value_name = "ID", conflicts_with_all = ["guest_name", "contact", "email"])]
    pub guest_id: Option<i64>,

    /// Guest full name
    #[arg(long, value_name = "NAME", requires = "contact")]
    pub guest_name: Option<String>,

    /// Guest contact number
    #[arg(long, value_name = "PHONE", requires = "guest_name")]
    pub contact: Option<String>,

    /// Guest e-mail
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Initial status: PENDING, CONFIRMED or CHECKED_IN
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Tax rate in percent (default: configured rate)
    #[arg(long, value_name = "PERCENT")]
    pub tax_rate: Option<Decimal>,

    /// Discount amount
    #[arg(long, value_name = "AMOUNT")]
    pub discount: Option<Money>,

    /// Id of the user recording the booking
    #[arg(long, value_name = "ID", default_value_t = 1, env = "INNKEEP_USER_ID")]
    pub created_by: i64,

    /// Output format (json prints the full quote)
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let room = find_room(db.connection(), &self.room)?;

        let mut request = match (self.guest_id, self.guest_name, self.contact) {
            (Some(guest_id), _, _) => CreateReservation::new(
                room.id,
                self.check_in,
                self.check_out,
                guest_id,
                self.created_by,
            ),
            (None, Some(name), Some(contact)) => {
                let mut details = GuestDetails::new(name, contact);
                if let Some(email) = self.email {
                    details = details.with_email(email);
                }
                CreateReservation::new(room.id, self.check_in, self.check_out, 0, self.created_by)
                    .for_guest(details)
            }
            _ => {
                return Err(CliError::InvalidArguments(
                    "Specify --guest-id or both --guest-name and --contact".to_string(),
                ))
            }
        };

        if let Some(status) = self.status {
            request = request.with_status(status);
        }
        if let Some(notes) = self.notes {
            request = request.with_notes(notes);
        }
        if let Some(tax_rate) = self.tax_rate {
            request = request.with_tax_rate(tax_rate);
        }
        if let Some(discount) = self.discount {
            request = request.with_discount(discount);
        }

        let created = ReservationManager::new(&mut db, &config).create(request)?;

        if self.format == OutputFormat::Json {
            write_json(&created)?;
        } else {
            writeln!(std::io::stdout(), "{}", created.number)?;
        }
        notify(
            global,
            &format!(
                "Reserved room {} for {} night(s), total {} {}",
                room.room_number,
                created.quote.nights,
                created.quote.total,
                config.currency()
            ),
        );

        Ok(())
    }
}
