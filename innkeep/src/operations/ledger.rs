//! Payment ledger.
//!
//! A reservation's `amount_paid` is the sum of its payments and never
//! exceeds its total. Each payment insert or delete rewrites `amount_paid`
//! and `payment_status` in the same transaction.

use rusqlite::Connection;
use serde::Serialize;

use crate::clock::Clock;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::money::out_of_range;
use crate::room::trimmed;
use crate::{Money, NewPayment, Payment, PaymentStatus, Reservation};

/// Result of recomputing a reservation's paid amount from its payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Reservation id.
    pub reservation_id: i64,
    /// Stored amount before reconciling.
    pub previous_amount_paid: Money,
    /// Amount after reconciling.
    pub amount_paid: Money,
    /// Derived payment status.
    pub payment_status: PaymentStatus,
}

impl Reconciliation {
    /// Returns `true` if the stored amount was wrong.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous_amount_paid != self.amount_paid
    }
}

/// Records and removes payments against reservations.
pub struct PaymentLedger<'a> {
    db: &'a mut Database,
    clock: Clock,
}

impl<'a> PaymentLedger<'a> {
    /// Creates a ledger over `db`.
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            clock: Clock::System,
        }
    }

    /// Uses `clock` to stamp payments.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Records a payment and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive amount or missing
    /// creator, [`Error::NotFound`] for an unknown reservation, or
    /// [`Error::Conflict`] if the reservation is already fully paid or the
    /// amount exceeds the remaining balance.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::operations::PaymentLedger;
    /// use innkeep::{Database, DatabaseConfig, Money, NewPayment};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// let payment = NewPayment::new(1, Money::new(20000, 2), 1).with_method("CASH");
    /// let id = PaymentLedger::new(&mut db).add_payment(payment).unwrap();
    /// # let _ = id;
    /// ```
    pub fn add_payment(&mut self, payment: NewPayment) -> Result<i64> {
        let amount = payment.amount.round2();
        if !amount.is_positive() {
            return Err(Error::validation("amount", "payment amount must be greater than zero"));
        }
        if payment.created_by <= 0 {
            return Err(Error::validation("created_by", "creator is required"));
        }

        let paid_at = self.clock.now();
        let (id, reservation) = self.db.with_transaction(|tx| {
            let reservation = load_reservation(tx, payment.reservation_id)?;

            let remaining = reservation
                .total
                .checked_sub(reservation.amount_paid)
                .ok_or_else(|| out_of_range("amount_paid"))?;
            if !remaining.is_positive() {
                return Err(Error::conflict(format!(
                    "reservation {} is already fully paid",
                    reservation.number
                )));
            }
            if amount > remaining {
                return Err(Error::conflict(format!(
                    "payment {amount} exceeds remaining balance {remaining}"
                )));
            }

            let id = Database::insert_payment(
                tx,
                &Payment {
                    id: 0,
                    reservation_id: reservation.id,
                    amount,
                    paid_at,
                    method: trimmed(payment.method.as_deref()),
                    note: trimmed(payment.note.as_deref()),
                    created_by: payment.created_by,
                },
            )?;
            let amount_paid = reservation
                .amount_paid
                .checked_add(amount)
                .ok_or_else(|| out_of_range("amount"))?
                .round2();
            let reservation = write_paid(tx, reservation, amount_paid)?;
            Ok((id, reservation))
        })?;

        log::info!(
            "recorded payment {amount} on {} ({})",
            reservation.number,
            reservation.payment_status
        );
        Ok(id)
    }

    /// Deletes a payment and reduces the reservation's paid amount.
    ///
    /// Returns `false` if no such payment exists.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn delete_payment(&mut self, payment_id: i64) -> Result<bool> {
        let removed = self.db.with_transaction(|tx| {
            let Some(payment) = Database::get_payment(tx, payment_id)? else {
                return Ok(None);
            };
            let reservation = load_reservation(tx, payment.reservation_id)?;
            Database::delete_payment(tx, payment_id)?;
            let amount_paid = reservation
                .amount_paid
                .checked_sub(payment.amount)
                .ok_or_else(|| out_of_range("amount"))?
                .round2()
                .floor_zero();
            let reservation = write_paid(tx, reservation, amount_paid)?;
            Ok(Some((payment, reservation)))
        })?;

        match removed {
            Some((payment, reservation)) => {
                log::info!(
                    "removed payment {} of {} from {}",
                    payment.id,
                    payment.amount,
                    reservation.number
                );
                Ok(true)
            }
            None => {
                log::debug!("payment {payment_id} not found");
                Ok(false)
            }
        }
    }

    /// A reservation's payments, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown reservation.
    pub fn payment_history(&self, reservation_id: i64) -> Result<Vec<Payment>> {
        let conn = self.db.connection();
        load_reservation(conn, reservation_id)?;
        Database::list_payments_for_reservation(conn, reservation_id)
    }

    /// Rewrites `amount_paid` from the stored payments, capped at the total.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown reservation, or a store
    /// error.
    pub fn reconcile(&mut self, reservation_id: i64) -> Result<Reconciliation> {
        let outcome = self.db.with_transaction(|tx| {
            let reservation = load_reservation(tx, reservation_id)?;
            let previous = reservation.amount_paid;
            let sum = Database::sum_payments_for_reservation(tx, reservation_id)?.round2();
            let capped = sum.min(reservation.total);
            let reservation = write_paid(tx, reservation, capped)?;
            Ok(Reconciliation {
                reservation_id,
                previous_amount_paid: previous,
                amount_paid: reservation.amount_paid,
                payment_status: reservation.payment_status,
            })
        })?;

        if outcome.changed() {
            log::warn!(
                "reservation {reservation_id} paid amount corrected from {} to {}",
                outcome.previous_amount_paid,
                outcome.amount_paid
            );
        }
        Ok(outcome)
    }
}

fn load_reservation(conn: &Connection, reservation_id: i64) -> Result<Reservation> {
    Database::get_reservation(conn, reservation_id)?
        .ok_or_else(|| Error::not_found(format!("reservation {reservation_id}")))
}

fn write_paid(
    conn: &Connection,
    mut reservation: Reservation,
    amount_paid: Money,
) -> Result<Reservation> {
    let status = PaymentStatus::derive(amount_paid, reservation.total);
    Database::update_payment_fields(conn, reservation.id, amount_paid, status)?;
    reservation.amount_paid = amount_paid;
    reservation.payment_status = status;
    Ok(reservation)
}
