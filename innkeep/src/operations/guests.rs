//! Guest resolution for new reservations.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::GuestDetails;

/// Who a reservation is for: an existing guest, or details to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestRef {
    /// A known guest id.
    Existing(i64),
    /// Details to find-or-create by.
    Details(GuestDetails),
}

/// Resolves a guest to an id.
///
/// An explicit id must exist. Otherwise the details are validated and
/// matched by contact number, then by e-mail; a new guest is inserted when
/// neither matches.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown id, a validation error for
/// incomplete details, or a database error.
pub fn resolve_guest(conn: &Connection, guest: &GuestRef) -> Result<i64> {
    match guest {
        GuestRef::Existing(id) => Database::get_guest(conn, *id)?
            .map(|g| g.id)
            .ok_or_else(|| Error::not_found(format!("guest {id}"))),
        GuestRef::Details(details) => {
            let details = details.validate()?;
            if let Some(found) = Database::find_guest_by_contact(conn, &details.contact_number)? {
                log::debug!("matched guest {} by contact number", found.id);
                return Ok(found.id);
            }
            if let Some(email) = details.email.as_deref() {
                if let Some(found) = Database::find_guest_by_email(conn, email)? {
                    log::debug!("matched guest {} by email", found.id);
                    return Ok(found.id);
                }
            }
            let id = Database::insert_guest(conn, &details)?;
            log::info!("created guest {id} ({})", details.full_name);
            Ok(id)
        }
    }
}
