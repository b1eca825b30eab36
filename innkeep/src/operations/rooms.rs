//! Room catalogue maintenance.

use crate::clock::Clock;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::operations::room_status::sync_room_status;
use crate::{Room, RoomSpec, RoomStatus};

/// Adds, edits, and retires rooms.
///
/// Rate changes only affect future quotes: existing reservations keep their
/// rate snapshot.
pub struct RoomCatalog<'a> {
    db: &'a mut Database,
    clock: Clock,
}

impl<'a> RoomCatalog<'a> {
    /// Creates a catalogue over `db` using the system clock.
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            clock: Clock::System,
        }
    }

    /// Uses `clock` when re-deriving room status.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Adds a room; it starts AVAILABLE.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad spec, or a conflict if the room
    /// number is taken.
    pub fn create_room(&mut self, spec: &RoomSpec) -> Result<Room> {
        let spec = spec.validate()?;
        self.db.with_transaction(|tx| {
            if Database::room_number_taken(tx, &spec.room_number, None)? {
                return Err(duplicate_number(&spec.room_number));
            }
            let id = Database::insert_room(tx, &spec)?;
            log::info!("added room {} ({id})", spec.room_number);
            load_room(tx, id)
        })
    }

    /// Replaces a room's details. Status is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown room, a validation error,
    /// or a conflict if another room already has the number.
    pub fn update_room(&mut self, room_id: i64, spec: &RoomSpec) -> Result<Room> {
        let spec = spec.validate()?;
        self.db.with_transaction(|tx| {
            load_room(tx, room_id)?;
            if Database::room_number_taken(tx, &spec.room_number, Some(room_id))? {
                return Err(duplicate_number(&spec.room_number));
            }
            Database::update_room(tx, room_id, &spec)?;
            load_room(tx, room_id)
        })
    }

    /// Pins a room to MAINTENANCE, or releases it.
    ///
    /// Releasing immediately re-derives BOOKED/AVAILABLE from the room's
    /// reservations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown room, or a database error.
    pub fn set_maintenance(&mut self, room_id: i64, maintenance: bool) -> Result<RoomStatus> {
        let today = self.clock.today();
        self.db.with_transaction(|tx| {
            let room = load_room(tx, room_id)?;
            if maintenance {
                Database::set_room_status(tx, room_id, RoomStatus::Maintenance)?;
                log::info!("room {} placed under maintenance", room.room_number);
                return Ok(RoomStatus::Maintenance);
            }
            if room.status == RoomStatus::Maintenance {
                // any non-maintenance value lets the sync re-derive
                Database::set_room_status(tx, room_id, RoomStatus::Available)?;
            }
            sync_room_status(tx, room_id, today)
        })
    }

    /// Deletes a room no reservation refers to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown room, or a conflict if any
    /// reservation, active or not, references it.
    pub fn delete_room(&mut self, room_id: i64) -> Result<()> {
        self.db.with_transaction(|tx| {
            let room = load_room(tx, room_id)?;
            let references = Database::count_reservations_for_room(tx, room_id)?;
            if references > 0 {
                return Err(Error::conflict(format!(
                    "room {} is referenced by {references} reservation(s)",
                    room.room_number
                )));
            }
            Database::delete_room(tx, room_id)?;
            log::info!("deleted room {}", room.room_number);
            Ok(())
        })
    }

    /// Loads a room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown room.
    pub fn get_room(&self, room_id: i64) -> Result<Room> {
        load_room(self.db.connection(), room_id)
    }

    /// Looks a room up by its number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no room has the number.
    pub fn find_room(&self, room_number: &str) -> Result<Room> {
        Database::get_room_by_number(self.db.connection(), room_number.trim())?
            .ok_or_else(|| Error::not_found(format!("room {}", room_number.trim())))
    }

    /// All rooms, ordered by number.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        Database::list_rooms(self.db.connection())
    }
}

fn load_room(conn: &rusqlite::Connection, room_id: i64) -> Result<Room> {
    Database::get_room(conn, room_id)?.ok_or_else(|| Error::not_found(format!("room {room_id}")))
}

fn duplicate_number(room_number: &str) -> Error {
    Error::conflict(format!("room number {room_number} already exists"))
}
