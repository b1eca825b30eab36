//! Calendar command implementation.
//!
//! Shows every active booking that touches a date window, one row per
//! booking, ordered by room number then check-in.

use crate::error::CliError;
use crate::utils::{find_room, load_configuration, open_database, write_records, GlobalOptions};
use chrono::{Days, NaiveDate};
use clap::Args;
use innkeep::{Database, OutputFormat, ReservationManager, StayDates, Tabular};
use serde::Serialize;
use std::collections::HashMap;

/// Show bookings per room over a date range.
#[derive(Args)]
pub struct CalendarCommand {
    /// Window start (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: NaiveDate,

    /// Window end, exclusive (default: 14 days after --from)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Restrict to one room number
    #[arg(long, value_name = "NUMBER")]
    pub room: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

/// One booking in the calendar window.
#[derive(Debug, Serialize)]
pub struct CalendarEntry {
    /// Room number.
    pub room_number: String,
    /// Reservation number.
    pub reservation_number: String,
    /// Guest name.
    pub guest: String,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Booking status.
    pub status: String,
}

impl Tabular for CalendarEntry {
    fn headers() -> &'static [&'static str] {
        &["room", "reservation", "guest", "check_in", "check_out", "status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.room_number.clone(),
            self.reservation_number.clone(),
            self.guest.clone(),
            self.check_in.to_string(),
            self.check_out.to_string(),
            self.status.clone(),
        ]
    }
}

impl CalendarCommand {
    /// Execute the calendar command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let to = match self.to {
            Some(to) => to,
            None => self.from.checked_add_days(Days::new(14)).ok_or_else(|| {
                CliError::InvalidArguments("--from is too close to the end of time".to_string())
            })?,
        };
        let window = StayDates::new(self.from, to)?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let only_room = match self.room {
            Some(ref number) => Some(find_room(db.connection(), number)?.id),
            None => None,
        };

        let room_numbers: HashMap<i64, String> = Database::list_rooms(db.connection())?
            .into_iter()
            .map(|room| (room.id, room.room_number))
            .collect();

        let reservations = ReservationManager::new(&mut db, &config).list_between(&window)?;

        let mut entries = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            if only_room.is_some_and(|id| id != reservation.room_id) {
                continue;
            }
            let guest = Database::get_guest(db.connection(), reservation.guest_id)?
                .map(|g| g.full_name)
                .unwrap_or_default();
            entries.push(CalendarEntry {
                room_number: room_numbers
                    .get(&reservation.room_id)
                    .cloned()
                    .unwrap_or_else(|| reservation.room_id.to_string()),
                reservation_number: reservation.number.to_string(),
                guest,
                check_in: reservation.check_in,
                check_out: reservation.check_out,
                status: reservation.status.to_string(),
            });
        }
        entries.sort_by(|a, b| {
            a.room_number
                .cmp(&b.room_number)
                .then(a.check_in.cmp(&b.check_in))
        });

        write_records(self.format, &entries)
    }
}
