//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `room`: Room catalog management
//! - `availability`: Per-room availability for a stay
//! - `reserve`: Create a reservation
//! - `update`: Edit a reservation
//! - `status`: Change a reservation's status
//! - `delete`: Delete a reservation
//! - `show`: Show one reservation
//! - `list`: List reservations
//! - `guests`: List guests
//! - `calendar`: Bookings per room over a date range
//! - `pay`: Record a payment
//! - `refund`: Remove a payment
//! - `payments`: Payment history
//! - `reconcile`: Recompute amounts paid
//! - `sync`: Re-derive room statuses
//! - `stats`: Dashboard statistics
//! - `completions`: Shell completion scripts

pub mod availability;
pub mod calendar;
pub mod completions;
pub mod delete;
pub mod guests;
pub mod list;
pub mod pay;
pub mod payments;
pub mod reconcile;
pub mod refund;
pub mod reserve;
pub mod room;
pub mod show;
pub mod stats;
pub mod status;
pub mod sync;
pub mod update;

pub use availability::AvailabilityCommand;
pub use calendar::CalendarCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use guests::GuestsCommand;
pub use list::ListCommand;
pub use pay::PayCommand;
pub use payments::PaymentsCommand;
pub use reconcile::ReconcileCommand;
pub use refund::RefundCommand;
pub use reserve::ReserveCommand;
pub use room::RoomCommand;
pub use show::ShowCommand;
pub use stats::StatsCommand;
pub use status::StatusCommand;
pub use sync::SyncCommand;
pub use update::UpdateCommand;
