//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, CalendarCommand, CompletionsCommand, DeleteCommand, GuestsCommand,
    ListCommand, PayCommand, PaymentsCommand, ReconcileCommand, RefundCommand, ReserveCommand, RoomCommand,
    ShowCommand, StatsCommand, StatusCommand, SyncCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing hotel room reservations.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Manage hotel rooms, reservations and payments", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "INNKEEP_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Manage rooms
    Room(RoomCommand),

    /// Show which rooms can take a stay
    Availability(AvailabilityCommand),

    /// Create a reservation
    Reserve(ReserveCommand),

    /// Change dates, room, guest, status, notes or pricing of a reservation
    Update(UpdateCommand),

    /// Set the status of a reservation
    Status(StatusCommand),

    /// Delete a reservation and its payments
    Delete(DeleteCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),

    /// List guests
    Guests(GuestsCommand),

    /// Show bookings per room over a date range
    Calendar(CalendarCommand),

    /// Record a payment against a reservation
    Pay(PayCommand),

    /// Remove a recorded payment
    Refund(RefundCommand),

    /// Show the payment history of a reservation
    Payments(PaymentsCommand),

    /// Recompute amounts paid from recorded payments
    Reconcile(ReconcileCommand),

    /// Re-derive every room's displayed status
    Sync(SyncCommand),

    /// Show dashboard statistics
    Stats(StatsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
