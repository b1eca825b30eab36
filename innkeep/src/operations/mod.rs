//! Reservation engine operations.
//!
//! Leaf components are free functions over a `&Connection` so they compose
//! inside one transaction: [`availability`], [`numbering`], [`pricing`],
//! [`room_status`]. The stateful entry points hold an explicit
//! `&mut Database` and open one IMMEDIATE transaction per mutation:
//! [`ReservationManager`], [`PaymentLedger`], [`RoomCatalog`].
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use innkeep::operations::{list_availability, CreateReservation, PaymentLedger, ReservationManager};
//! use innkeep::{ConfigBuilder, Database, DatabaseConfig, GuestDetails, Money, NewPayment, StayDates};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let config = ConfigBuilder::new().build().unwrap();
//! let d = |day| NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
//!
//! let stay = StayDates::new(d(10), d(15)).unwrap();
//! let free = list_availability(db.connection(), &stay).unwrap();
//! let room = free.iter().find(|r| r.is_available()).unwrap();
//!
//! let request = CreateReservation::new(room.room_id, d(10), d(15), 0, 1)
//!     .for_guest(GuestDetails::new("Ada Lovelace", "0771234567"));
//! let created = ReservationManager::new(&mut db, &config).create(request).unwrap();
//!
//! PaymentLedger::new(&mut db)
//!     .add_payment(NewPayment::new(created.id, Money::new(200, 0), 1))
//!     .unwrap();
//! ```

pub mod availability;
pub mod guests;
pub mod ledger;
pub mod lifecycle;
pub mod numbering;
pub mod pricing;
pub mod room_status;
pub mod rooms;
pub mod stats;

#[cfg(test)]
mod proptests;

pub use availability::{has_conflict, list_availability, RoomAvailability};
pub use guests::{resolve_guest, GuestRef};
pub use ledger::{PaymentLedger, Reconciliation};
pub use lifecycle::{CreateReservation, CreatedReservation, ReservationManager, UpdateReservation};
pub use numbering::next_number;
pub use pricing::{price, Quote};
pub use room_status::{sync_all_rooms, sync_room_status, RoomSync};
pub use rooms::RoomCatalog;
pub use stats::{dashboard_stats, DashboardStats, DayCount};
