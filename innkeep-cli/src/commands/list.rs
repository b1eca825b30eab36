//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV) with optional filters.

use crate::error::CliError;
use crate::utils::{find_room, load_configuration, open_database, write_records, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{OutputFormat, ReservationManager, ReservationStatus, StayDates};

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "INNKEEP_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Filter by room number
    #[arg(long, value_name = "NUMBER")]
    pub filter_room: Option<String>,

    /// Filter by guest id
    #[arg(long, value_name = "ID")]
    pub guest: Option<i64>,

    /// Filter by status
    #[arg(long, value_name = "STATUS")]
    pub filter_status: Option<ReservationStatus>,

    /// Only active stays overlapping [from, to)
    #[arg(long, value_name = "DATE", requires = "to")]
    pub from: Option<NaiveDate>,

    /// End of the window (exclusive)
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<NaiveDate>,

    /// Only PENDING, CONFIRMED and CHECKED_IN reservations
    #[arg(long, conflicts_with = "filter_status")]
    pub active: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let room_id = match self.filter_room {
            Some(ref number) => Some(find_room(db.connection(), number)?.id),
            None => None,
        };

        let manager = ReservationManager::new(&mut db, &config);
        let mut reservations = match (self.from, self.to, self.guest) {
            (Some(from), Some(to), _) => manager.list_between(&StayDates::new(from, to)?)?,
            (_, _, Some(guest_id)) => manager.list_for_guest(guest_id)?,
            _ => manager.list_all()?,
        };

        if let Some(guest_id) = self.guest {
            reservations.retain(|r| r.guest_id == guest_id);
        }
        if let Some(room_id) = room_id {
            reservations.retain(|r| r.room_id == room_id);
        }
        if let Some(status) = self.filter_status {
            reservations.retain(|r| r.status == status);
        }
        if self.active {
            reservations.retain(|r| r.status.is_active());
        }

        write_records(self.format, &reservations)
    }
}
