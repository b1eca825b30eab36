#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library for hotel room reservations.
//!
//! It allocates rooms to guests over date ranges without double-booking,
//! prices stays, tracks partial payments, and keeps each room's displayed
//! status in step with its bookings. Everything is persisted in SQLite and
//! every mutation is a single transaction.
//!
//! ## Core Types
//!
//! - [`StayDates`]: half-open `[check_in, check_out)` ranges
//! - [`Money`]: decimal currency amounts rounded half-up to cents
//! - [`Room`], [`Reservation`], [`Payment`], [`Guest`]: stored records
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::{Money, StayDates};
//! use innkeep::operations::price;
//! use rust_decimal::Decimal;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
//! let booked = StayDates::new(d(10), d(15)).unwrap();
//! assert!(booked.overlaps(&StayDates::new(d(12), d(18)).unwrap()));
//! assert!(!booked.overlaps(&StayDates::new(d(15), d(18)).unwrap()));
//!
//! let quote = price(booked.nights(), Money::new(100, 0), Decimal::TEN, Money::new(20, 0)).unwrap();
//! assert_eq!(quote.total, Money::new(53000, 2));
//! ```

pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod guest;
pub mod logging;
pub mod money;
pub mod operations;
pub mod output;
pub mod payment;
pub mod reservation;
pub mod room;
pub mod stay;

// Re-export key types at crate root for convenience
pub use clock::Clock;
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, Result};
pub use guest::{Guest, GuestDetails};
pub use logging::{init_logger, LogLevel, Logger};
pub use money::Money;
pub use operations::{
    CreateReservation, CreatedReservation, GuestRef, PaymentLedger, Quote, ReservationManager,
    RoomCatalog, UpdateReservation,
};
pub use output::{OutputFormat, Tabular};
pub use payment::{NewPayment, Payment};
pub use reservation::{PaymentStatus, Reservation, ReservationNumber, ReservationStatus};
pub use room::{Room, RoomSpec, RoomStatus};
pub use stay::StayDates;
