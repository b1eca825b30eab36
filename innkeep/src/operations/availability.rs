//! Availability checks.
//!
//! Two stays on the same room conflict iff their half-open ranges overlap
//! and both are active (PENDING, CONFIRMED or CHECKED_IN).

use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Money, RoomStatus, StayDates};

/// Message used for every overlap rejection.
pub const OVERLAP_MESSAGE: &str = "selected dates overlap with an existing reservation";

/// Returns `true` if an active reservation on `room_id` overlaps `stay`.
///
/// `exclude_reservation_id` skips the reservation being edited. Read-only.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub fn has_conflict(
    conn: &Connection,
    room_id: i64,
    stay: &StayDates,
    exclude_reservation_id: Option<i64>,
) -> Result<bool> {
    Database::has_active_overlap(conn, room_id, stay, exclude_reservation_id)
}

/// Like [`has_conflict`], but turns an overlap into [`Error::Conflict`].
///
/// # Errors
///
/// Returns a conflict error on overlap, or a database error.
pub fn ensure_available(
    conn: &Connection,
    room_id: i64,
    stay: &StayDates,
    exclude_reservation_id: Option<i64>,
) -> Result<()> {
    if has_conflict(conn, room_id, stay, exclude_reservation_id)? {
        log::info!("room {room_id} is taken for {stay}");
        return Err(Error::conflict(OVERLAP_MESSAGE));
    }
    Ok(())
}

/// One room's availability for a requested stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomAvailability {
    /// Room id.
    pub room_id: i64,
    /// Room number.
    pub room_number: String,
    /// Room type.
    pub room_type: String,
    /// Current nightly rate.
    pub price: Money,
    /// Maximum occupancy.
    pub max_guests: u32,
    /// MAINTENANCE if pinned, BOOKED if an active reservation overlaps the
    /// stay, else AVAILABLE.
    pub status: RoomStatus,
}

impl RoomAvailability {
    /// Returns `true` if the room can take the stay.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }
}

/// Reports every room's availability for `stay`, ordered by room number.
///
/// # Errors
///
/// Returns a database error if a query fails.
pub fn list_availability(conn: &Connection, stay: &StayDates) -> Result<Vec<RoomAvailability>> {
    let booked = Database::rooms_booked_during(conn, stay)?;
    let rooms = Database::list_rooms(conn)?;

    Ok(rooms
        .into_iter()
        .map(|room| {
            let status = if room.status == RoomStatus::Maintenance {
                RoomStatus::Maintenance
            } else if booked.contains(&room.id) {
                RoomStatus::Booked
            } else {
                RoomStatus::Available
            };
            RoomAvailability {
                room_id: room.id,
                room_number: room.room_number,
                room_type: room.room_type,
                price: room.rate_per_night,
                max_guests: room.max_guests,
                status,
            }
        })
        .collect())
}
