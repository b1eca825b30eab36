//! Room status synchronization.
//!
//! A room's displayed status is derived from its bookings: BOOKED while an
//! active reservation covers today, AVAILABLE otherwise. MAINTENANCE is set
//! by staff and never overwritten here.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::RoomStatus;

/// Re-derives and stores one room's status as of `today`.
///
/// Idempotent. Called by every reservation mutation inside the same
/// transaction, for every room it touches.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown room, or a database error.
pub fn sync_room_status(conn: &Connection, room_id: i64, today: NaiveDate) -> Result<RoomStatus> {
    let room = Database::get_room(conn, room_id)?
        .ok_or_else(|| Error::not_found(format!("room {room_id}")))?;

    if room.status == RoomStatus::Maintenance {
        log::debug!("room {} is under maintenance, leaving it", room.room_number);
        return Ok(RoomStatus::Maintenance);
    }

    let status = if Database::has_active_reservation_covering(conn, room_id, today)? {
        RoomStatus::Booked
    } else {
        RoomStatus::Available
    };

    if status != room.status {
        Database::set_room_status(conn, room_id, status)?;
        log::info!("room {} is now {status}", room.room_number);
    }
    Ok(status)
}

/// Outcome of syncing one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSync {
    /// Room id.
    pub room_id: i64,
    /// Room number.
    pub room_number: String,
    /// Status before the sync.
    pub previous: RoomStatus,
    /// Status after the sync.
    pub current: RoomStatus,
}

impl RoomSync {
    /// Returns `true` if the sync changed the stored status.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Syncs every room, ordered by room number.
///
/// # Errors
///
/// Returns a database error if a query fails.
pub fn sync_all_rooms(conn: &Connection, today: NaiveDate) -> Result<Vec<RoomSync>> {
    let rooms = Database::list_rooms(conn)?;
    let mut results = Vec::with_capacity(rooms.len());
    for room in rooms {
        let current = sync_room_status(conn, room.id, today)?;
        results.push(RoomSync {
            room_id: room.id,
            room_number: room.room_number,
            previous: room.status,
            current,
        });
    }
    Ok(results)
}
