//! Build script for innkeep-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("innkeep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage hotel rooms, reservations and payments")
        .long_about(
            "Command-line tool for booking hotel rooms without double-booking, \
             pricing stays and tracking partial payments",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("INNKEEP_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("INNKEEP_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("room")
                .about("Manage rooms")
                .long_about("Add, list, show, update, pin for maintenance and delete rooms"),
            Command::new("availability")
                .about("Show which rooms can take a stay")
                .long_about("Report every room as AVAILABLE, BOOKED or MAINTENANCE for a stay"),
            Command::new("reserve")
                .about("Create a reservation")
                .long_about("Book a room for a guest and print the reservation number"),
            Command::new("update")
                .about("Change a reservation")
                .long_about("Change dates, room, guest, status, notes or pricing; re-checks conflicts"),
            Command::new("status")
                .about("Set the status of a reservation")
                .long_about("Move a reservation between PENDING, CONFIRMED, CHECKED_IN, CANCELLED and CHECKED_OUT"),
            Command::new("delete")
                .about("Delete a reservation and its payments"),
            Command::new("show").about("Show one reservation"),
            Command::new("list")
                .about("List reservations")
                .long_about("Display reservations in table, JSON or CSV format, optionally for one guest"),
            Command::new("guests").about("List guests"),
            Command::new("calendar")
                .about("Show bookings per room over a date range"),
            Command::new("pay")
                .about("Record a payment against a reservation")
                .long_about("Record a payment; overpayments are refused"),
            Command::new("refund").about("Remove a recorded payment"),
            Command::new("payments").about("Show the payment history of a reservation"),
            Command::new("reconcile")
                .about("Recompute amounts paid from recorded payments"),
            Command::new("sync")
                .about("Re-derive every room's displayed status"),
            Command::new("stats").about("Show dashboard statistics"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("innkeep.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
