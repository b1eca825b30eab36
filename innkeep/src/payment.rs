//! Recorded payments against a reservation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Money;

/// One payment received for a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Store identifier.
    pub id: i64,
    /// The reservation this payment belongs to.
    pub reservation_id: i64,
    /// Amount received, always positive.
    pub amount: Money,
    /// When the payment was recorded.
    pub paid_at: DateTime<Utc>,
    /// Payment method, e.g. `CASH` or `CARD`.
    pub method: Option<String>,
    /// Free-text note.
    pub note: Option<String>,
    /// User that recorded the payment.
    pub created_by: i64,
}

/// Input for [`PaymentLedger::add_payment`](crate::operations::ledger::PaymentLedger::add_payment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    /// Target reservation.
    pub reservation_id: i64,
    /// Amount to record.
    pub amount: Money,
    /// Optional method; blank becomes `None`.
    pub method: Option<String>,
    /// Optional note; blank becomes `None`.
    pub note: Option<String>,
    /// Recording user.
    pub created_by: i64,
}

impl NewPayment {
    /// Creates a payment input with no method or note.
    #[must_use]
    pub const fn new(reservation_id: i64, amount: Money, created_by: i64) -> Self {
        Self {
            reservation_id,
            amount,
            method: None,
            note: None,
            created_by,
        }
    }

    /// Sets the payment method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
