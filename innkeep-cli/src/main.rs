//! Main entry point for the innkeep CLI.
//!
//! This is the operator interface to the innkeep reservation engine:
//! - `room`: Add, edit and retire rooms
//! - `availability`: Check which rooms can take a stay
//! - `reserve`, `update`, `status`, `delete`: Manage reservations
//! - `show`, `list`, `calendar`, `guests`: Look things up
//! - `pay`, `refund`, `payments`, `reconcile`: Track payments
//! - `sync`, `stats`: Housekeeping and reporting

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _logger = innkeep::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Room(cmd) => cmd.execute(&global),
        cli::Command::Availability(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Update(cmd) => cmd.execute(&global),
        cli::Command::Status(cmd) => cmd.execute(&global),
        cli::Command::Delete(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Guests(cmd) => cmd.execute(&global),
        cli::Command::Calendar(cmd) => cmd.execute(&global),
        cli::Command::Pay(cmd) => cmd.execute(&global),
        cli::Command::Refund(cmd) => cmd.execute(&global),
        cli::Command::Payments(cmd) => cmd.execute(&global),
        cli::Command::Reconcile(cmd) => cmd.execute(&global),
        cli::Command::Sync(cmd) => cmd.execute(&global),
        cli::Command::Stats(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
