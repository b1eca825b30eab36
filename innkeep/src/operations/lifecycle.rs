//! Reservation lifecycle: create, update, status changes, delete.
//!
//! Each mutation is one IMMEDIATE transaction. Inputs are validated before
//! the transaction opens; inside it the conflict check, pricing, number
//! generation, write, and room sync all run under the write lock, so two
//! overlapping requests serialize and the loser gets an ordinary conflict.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::clock::Clock;
use crate::config::{Config, ConfigValidator};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::operations::availability::ensure_available;
use crate::operations::guests::{resolve_guest, GuestRef};
use crate::operations::numbering::next_number;
use crate::operations::pricing::{price, Quote};
use crate::operations::room_status::sync_room_status;
use crate::room::trimmed;
use crate::{
    GuestDetails, Money, PaymentStatus, Reservation, ReservationNumber, ReservationStatus, Room,
    StayDates,
};

/// Input for a new reservation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    /// Room to book.
    pub room_id: i64,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure date, exclusive.
    pub check_out: NaiveDate,
    /// Guest to book for.
    pub guest: GuestRef,
    /// Requested status; blank means PENDING.
    pub status: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Tax percent; the configured default when `None`.
    pub tax_rate: Option<Decimal>,
    /// Flat discount.
    pub discount: Money,
    /// Staff member creating the reservation.
    pub created_by: i64,
}

impl CreateReservation {
    /// Creates an input for an existing guest.
    #[must_use]
    pub fn new(
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guest_id: i64,
        created_by: i64,
    ) -> Self {
        Self {
            room_id,
            check_in,
            check_out,
            guest: GuestRef::Existing(guest_id),
            status: None,
            notes: None,
            tax_rate: None,
            discount: Money::ZERO,
            created_by,
        }
    }

    /// Books for a guest found or created from `details`.
    #[must_use]
    pub fn for_guest(mut self, details: GuestDetails) -> Self {
        self.guest = GuestRef::Details(details);
        self
    }

    /// Sets the requested status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the tax percent.
    #[must_use]
    pub const fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    /// Sets the discount.
    #[must_use]
    pub const fn with_discount(mut self, discount: Money) -> Self {
        self.discount = discount;
        self
    }
}

/// Changes to an existing reservation. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservation {
    /// Move to another room.
    pub room_id: Option<i64>,
    /// New first night.
    pub check_in: Option<NaiveDate>,
    /// New departure date.
    pub check_out: Option<NaiveDate>,
    /// New status; any of the five.
    pub status: Option<String>,
    /// New notes; an empty string clears them.
    pub notes: Option<String>,
    /// New tax percent.
    pub tax_rate: Option<Decimal>,
    /// New discount.
    pub discount: Option<Money>,
    /// Rebook for another guest, resolved like a new reservation's guest.
    pub guest: Option<GuestRef>,
}

impl UpdateReservation {
    /// An update that changes nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to `room_id`.
    #[must_use]
    pub const fn with_room(mut self, room_id: i64) -> Self {
        self.room_id = Some(room_id);
        self
    }

    /// Changes the dates.
    #[must_use]
    pub const fn with_dates(mut self, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        self.check_in = Some(check_in);
        self.check_out = Some(check_out);
        self
    }

    /// Changes the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Changes the tax percent.
    #[must_use]
    pub const fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    /// Changes the discount.
    #[must_use]
    pub const fn with_discount(mut self, discount: Money) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Moves the reservation to another guest.
    #[must_use]
    pub fn with_guest(mut self, guest: GuestRef) -> Self {
        self.guest = Some(guest);
        self
    }
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedReservation {
    /// New reservation id.
    pub id: i64,
    /// Issued reservation number.
    pub number: ReservationNumber,
    /// Charges computed for the stay.
    pub quote: Quote,
}

/// Drives reservations through their lifecycle.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use innkeep::operations::{CreateReservation, ReservationManager};
/// use innkeep::{Config, Database, DatabaseConfig, GuestDetails};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let config = Config::default();
/// let d = |day| NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
///
/// let request = CreateReservation::new(1, d(10), d(15), 0, 1)
///     .for_guest(GuestDetails::new("Ada Lovelace", "0771234567"))
///     .with_status("CONFIRMED");
/// let created = ReservationManager::new(&mut db, &config).create(request).unwrap();
/// println!("{} due {}", created.number, created.quote.total);
/// ```
pub struct ReservationManager<'a> {
    db: &'a mut Database,
    config: &'a Config,
    clock: Clock,
}

impl<'a> ReservationManager<'a> {
    /// Creates a manager over `db`, syncing rooms against the UTC date.
    pub fn new(db: &'a mut Database, config: &'a Config) -> Self {
        Self {
            db,
            config,
            clock: Clock::System,
        }
    }

    /// Uses `clock` for timestamps and for "today".
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Books a room.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, [`Error::NotFound`] for an
    /// unknown room or guest, [`Error::Conflict`] if the room is taken for
    /// any of the nights, or a store error. Nothing is written on error.
    pub fn create(&mut self, request: CreateReservation) -> Result<CreatedReservation> {
        if request.room_id <= 0 {
            return Err(Error::validation("room_id", "room is required"));
        }
        let stay = StayDates::new(request.check_in, request.check_out)?;
        if request.created_by <= 0 {
            return Err(Error::validation("created_by", "creator is required"));
        }
        let status =
            ReservationStatus::normalize(request.status.as_deref(), &ReservationStatus::CREATABLE)?;
        let tax_rate = request
            .tax_rate
            .unwrap_or_else(|| self.config.default_tax_rate());
        validate_charges(tax_rate, request.discount)?;
        if let GuestRef::Details(details) = &request.guest {
            details.validate()?;
        }

        let now = self.clock.now();
        let today = self.clock.today();
        let created = self.db.with_transaction(|tx| {
            let guest_id = resolve_guest(tx, &request.guest)?;
            ensure_available(tx, request.room_id, &stay, None)?;

            let room = load_room(tx, request.room_id)?;
            let quote = price(stay.nights(), room.rate_per_night, tax_rate, request.discount)?;
            let number = next_number(tx, stay.check_in())?;

            let reservation = Reservation {
                id: 0,
                number: number.clone(),
                guest_id,
                room_id: room.id,
                check_in: stay.check_in(),
                check_out: stay.check_out(),
                status,
                notes: trimmed(request.notes.as_deref()),
                nights: quote.nights,
                rate_per_night: quote.rate,
                subtotal: quote.subtotal,
                tax_rate: quote.tax_rate,
                tax: quote.tax,
                discount: quote.discount,
                total: quote.total,
                amount_paid: Money::ZERO,
                payment_status: PaymentStatus::derive(Money::ZERO, quote.total),
                created_by: request.created_by,
                created_at: now,
            };
            let id = Database::insert_reservation(tx, &reservation)?;
            sync_room_status(tx, room.id, today)?;

            Ok(CreatedReservation { id, number, quote })
        })?;

        log::info!(
            "created reservation {} for room {} {stay}",
            created.number,
            request.room_id
        );
        Ok(created)
    }

    /// Edits a reservation and re-prices it against the current room rate.
    ///
    /// The availability check runs (excluding this reservation) when the
    /// room or dates change, or when the status moves from inactive to
    /// active. The new total may not fall below what has already been paid.
    /// A new guest is matched or created the same way [`Self::create`] does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] (for the reservation, room or guest id),
    /// a validation error, [`Error::Conflict`]
    /// for an overlap or a total below the amount paid, or a store error.
    pub fn update(&mut self, reservation_id: i64, changes: UpdateReservation) -> Result<Reservation> {
        let new_status = changes
            .status
            .as_deref()
            .map(|s| ReservationStatus::normalize(Some(s), &ReservationStatus::ALL))
            .transpose()?;
        if let Some(tax_rate) = changes.tax_rate {
            ConfigValidator::validate_tax_rate("tax_rate", tax_rate)?;
        }
        if changes.discount.is_some_and(Money::is_negative) {
            return Err(Error::validation("discount", "cannot be negative"));
        }
        if let Some(GuestRef::Details(details)) = &changes.guest {
            details.validate()?;
        }

        let today = self.clock.today();
        let updated = self.db.with_transaction(|tx| {
            let existing = load_reservation(tx, reservation_id)?;
            let guest_id = match &changes.guest {
                Some(guest) => resolve_guest(tx, guest)?,
                None => existing.guest_id,
            };

            let room_id = changes.room_id.unwrap_or(existing.room_id);
            let stay = StayDates::new(
                changes.check_in.unwrap_or(existing.check_in),
                changes.check_out.unwrap_or(existing.check_out),
            )?;
            let status = new_status.unwrap_or(existing.status);

            let room_changed = room_id != existing.room_id;
            let dates_changed =
                stay.check_in() != existing.check_in || stay.check_out() != existing.check_out;
            let reactivated = !existing.status.is_active() && status.is_active();
            if status.is_active() && (room_changed || dates_changed || reactivated) {
                ensure_available(tx, room_id, &stay, Some(reservation_id))?;
            }

            let room = load_room(tx, room_id)?;
            let quote = price(
                stay.nights(),
                room.rate_per_night,
                changes.tax_rate.unwrap_or(existing.tax_rate),
                changes.discount.unwrap_or(existing.discount),
            )?;
            if quote.total < existing.amount_paid {
                return Err(Error::conflict(format!(
                    "new total {} is below the {} already paid",
                    quote.total, existing.amount_paid
                )));
            }

            let notes = match changes.notes.as_deref() {
                Some(notes) => trimmed(Some(notes)),
                None => existing.notes.clone(),
            };
            let reservation = Reservation {
                guest_id,
                room_id,
                check_in: stay.check_in(),
                check_out: stay.check_out(),
                status,
                notes,
                nights: quote.nights,
                rate_per_night: quote.rate,
                subtotal: quote.subtotal,
                tax_rate: quote.tax_rate,
                tax: quote.tax,
                discount: quote.discount,
                total: quote.total,
                payment_status: PaymentStatus::derive(existing.amount_paid, quote.total),
                ..existing.clone()
            };
            Database::update_reservation(tx, &reservation)?;

            sync_room_status(tx, room_id, today)?;
            if room_changed {
                sync_room_status(tx, existing.room_id, today)?;
            }
            Ok(reservation)
        })?;

        log::info!("updated reservation {}", updated.number);
        Ok(updated)
    }

    /// Moves a reservation to another status.
    ///
    /// Reactivating a CANCELLED or CHECKED_OUT reservation is checked for
    /// conflicts first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`], a validation error for an unknown
    /// status, [`Error::Conflict`] if reactivation would double-book, or a
    /// store error.
    pub fn update_status(&mut self, reservation_id: i64, status: &str) -> Result<Reservation> {
        let status = ReservationStatus::normalize(Some(status), &ReservationStatus::ALL)?;
        let today = self.clock.today();
        let updated = self.db.with_transaction(|tx| {
            let mut reservation = load_reservation(tx, reservation_id)?;
            if !reservation.status.is_active() && status.is_active() {
                ensure_available(tx, reservation.room_id, &reservation.stay()?, Some(reservation_id))?;
            }
            Database::update_reservation_status(tx, reservation_id, status)?;
            sync_room_status(tx, reservation.room_id, today)?;
            reservation.status = status;
            Ok(reservation)
        })?;

        log::info!("reservation {} is now {status}", updated.number);
        Ok(updated)
    }

    /// Deletes a reservation and its payments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or a store error.
    pub fn delete(&mut self, reservation_id: i64) -> Result<Reservation> {
        let today = self.clock.today();
        let deleted = self.db.with_transaction(|tx| {
            let reservation = load_reservation(tx, reservation_id)?;
            let payments = Database::delete_payments_for_reservation(tx, reservation_id)?;
            Database::delete_reservation(tx, reservation_id)?;
            sync_room_status(tx, reservation.room_id, today)?;
            log::debug!("removed {payments} payment(s) with reservation {reservation_id}");
            Ok(reservation)
        })?;

        log::info!("deleted reservation {}", deleted.number);
        Ok(deleted)
    }

    /// Loads a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such reservation.
    pub fn get(&self, reservation_id: i64) -> Result<Reservation> {
        load_reservation(self.db.connection(), reservation_id)
    }

    /// Loads a reservation by its number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no reservation has the number.
    pub fn find_by_number(&self, number: &str) -> Result<Reservation> {
        let number = number.trim();
        Database::get_reservation_by_number(self.db.connection(), number)?
            .ok_or_else(|| Error::not_found(format!("reservation {number}")))
    }

    /// Every reservation, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_all(&self) -> Result<Vec<Reservation>> {
        Database::list_all_reservations(self.db.connection())
    }

    /// A guest's reservations in any status, latest check-in first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown guest, or a database error.
    pub fn list_for_guest(&self, guest_id: i64) -> Result<Vec<Reservation>> {
        let conn = self.db.connection();
        if Database::get_guest(conn, guest_id)?.is_none() {
            return Err(Error::not_found(format!("guest {guest_id}")));
        }
        Database::list_reservations_for_guest(conn, guest_id)
    }

    /// A room's active reservations by check-in date.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_active_for_room(&self, room_id: i64) -> Result<Vec<Reservation>> {
        Database::list_active_reservations_for_room(self.db.connection(), room_id)
    }

    /// Active reservations overlapping `range`, for a calendar view.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn list_between(&self, range: &StayDates) -> Result<Vec<Reservation>> {
        Database::list_active_reservations_overlapping(self.db.connection(), range)
    }
}

fn validate_charges(tax_rate: Decimal, discount: Money) -> Result<()> {
    ConfigValidator::validate_tax_rate("tax_rate", tax_rate)?;
    if discount.is_negative() {
        return Err(Error::validation("discount", "cannot be negative"));
    }
    Ok(())
}

fn load_room(conn: &Connection, room_id: i64) -> Result<Room> {
    Database::get_room(conn, room_id)?.ok_or_else(|| Error::not_found(format!("room {room_id}")))
}

fn load_reservation(conn: &Connection, reservation_id: i64) -> Result<Reservation> {
    Database::get_reservation(conn, reservation_id)?
        .ok_or_else(|| Error::not_found(format!("reservation {reservation_id}")))
}
