//! Room command implementation.
//!
//! This module implements the `room` command family: adding, listing,
//! editing, pinning for maintenance and deleting rooms.

use crate::error::CliError;
use crate::utils::{
    find_room, load_configuration, notify, open_database, write_record, write_records,
    GlobalOptions,
};
use clap::{Args, Subcommand};
use innkeep::{Money, OutputFormat, RoomCatalog, RoomSpec};
use std::io::Write;

/// Manage rooms.
#[derive(Args)]
pub struct RoomCommand {
    #[command(subcommand)]
    pub action: RoomAction,
}

/// Room subcommands.
#[derive(Subcommand)]
pub enum RoomAction {
    /// Add a room
    Add(RoomAddArgs),

    /// List all rooms
    List(RoomListArgs),

    /// Show one room
    Show(RoomShowArgs),

    /// Change a room's details
    Update(RoomUpdateArgs),

    /// Pin a room for maintenance, or release it with --clear
    Maintenance(RoomMaintenanceArgs),

    /// Delete a room that has never been booked
    Delete(RoomDeleteArgs),
}

/// Arguments for `room add`.
#[derive(Args)]
pub struct RoomAddArgs {
    /// Room number, unique across the hotel
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Room category
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: String,

    /// Nightly rate
    #[arg(long, value_name = "AMOUNT")]
    pub rate: Money,

    /// Maximum occupancy
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    pub max_guests: u32,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Picture URL
    #[arg(long, value_name = "URL")]
    pub image_url: Option<String>,
}

/// Arguments for `room list`.
#[derive(Args)]
pub struct RoomListArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

/// Arguments for `room show`.
#[derive(Args)]
pub struct RoomShowArgs {
    /// Room number
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

/// Arguments for `room update`. Omitted options keep their current value.
#[derive(Args)]
pub struct RoomUpdateArgs {
    /// Room number
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// New room number
    #[arg(long, value_name = "NUMBER")]
    pub new_number: Option<String>,

    /// Room category
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: Option<String>,

    /// Nightly rate
    #[arg(long, value_name = "AMOUNT")]
    pub rate: Option<Money>,

    /// Maximum occupancy
    #[arg(long, value_name = "COUNT")]
    pub max_guests: Option<u32>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Picture URL
    #[arg(long, value_name = "URL")]
    pub image_url: Option<String>,
}

/// Arguments for `room maintenance`.
#[derive(Args)]
pub struct RoomMaintenanceArgs {
    /// Room number
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Release the room instead of pinning it
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for `room delete`.
#[derive(Args)]
pub struct RoomDeleteArgs {
    /// Room number
    #[arg(value_name = "NUMBER")]
    pub number: String,
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self.action {
            RoomAction::Add(args) => {
                let spec = RoomSpec::new(args.number, args.room_type, args.rate)
                    .with_max_guests(args.max_guests)
                    .with_description(args.description)
                    .with_image_url(args.image_url);
                let room = RoomCatalog::new(&mut db).create_room(&spec)?;

                writeln!(std::io::stdout(), "{}", room.room_number)?;
                notify(
                    global,
                    &format!(
                        "Added room {} ({}, {} per night)",
                        room.room_number, room.room_type, room.rate_per_night
                    ),
                );
            }
            RoomAction::List(args) => {
                let rooms = RoomCatalog::new(&mut db).list_rooms()?;
                write_records(args.format, &rooms)?;
            }
            RoomAction::Show(args) => {
                let room = find_room(db.connection(), &args.number)?;
                write_record(args.format, &room)?;
            }
            RoomAction::Update(args) => {
                let room = find_room(db.connection(), &args.number)?;
                let spec = RoomSpec::new(
                    args.new_number.unwrap_or(room.room_number),
                    args.room_type.unwrap_or(room.room_type),
                    args.rate.unwrap_or(room.rate_per_night),
                )
                .with_max_guests(args.max_guests.unwrap_or(room.max_guests))
                .with_description(args.description.or(room.description))
                .with_image_url(args.image_url.or(room.image_url));

                let updated = RoomCatalog::new(&mut db).update_room(room.id, &spec)?;
                notify(global, &format!("Updated room {}", updated.room_number));
            }
            RoomAction::Maintenance(args) => {
                let room = find_room(db.connection(), &args.number)?;
                let status = RoomCatalog::new(&mut db).set_maintenance(room.id, !args.clear)?;

                writeln!(std::io::stdout(), "{status}")?;
                notify(global, &format!("Room {} is now {status}", room.room_number));
            }
            RoomAction::Delete(args) => {
                let room = find_room(db.connection(), &args.number)?;
                RoomCatalog::new(&mut db).delete_room(room.id)?;
                notify(global, &format!("Deleted room {}", room.room_number));
            }
        }

        Ok(())
    }
}
