//! Integration tests for configuration layering.
//!
//! Tests that touch `INNKEEP_*` variables are `#[serial]`: the environment
//! is process-global.

mod common;

use std::env;
use std::fs;

use common::database::{add_room, create_test_database};
use common::{feb, money};
use innkeep::config::environment::{DASHBOARD_DAYS_ENV, DEFAULT_TAX_RATE_ENV};
use innkeep::config::loader::CONFIG_FILE_NAME;
use innkeep::operations::dashboard_stats;
use innkeep::{ConfigBuilder, CreateReservation, Error, GuestDetails, ReservationManager};
use rust_decimal::Decimal;
use serial_test::serial;
use tempfile::TempDir;

/// Sets an environment variable and restores the previous value on drop.
struct EnvGuard {
    key: &'static str,
    old_value: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self { key, old_value }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(self.key, value),
            None => env::remove_var(self.key),
        }
    }
}

fn write_config(dir: &TempDir, content: &str) {
    fs::write(dir.path().join(CONFIG_FILE_NAME), content).unwrap();
}

#[test]
#[serial]
fn test_file_tax_rate_prices_reservations() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "pricing:\n  default_tax_rate: 12.5\n  currency: USD\n");
    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .skip_env()
        .build()
        .unwrap();
    assert_eq!(config.currency(), "USD");

    let mut db = create_test_database();
    let room = add_room(&mut db, "101", money("100"));
    let created = ReservationManager::new(&mut db, &config)
        .create(
            CreateReservation::new(room.id, feb(10), feb(12), 0, 1)
                .for_guest(GuestDetails::new("Ada", "0771")),
        )
        .unwrap();
    assert_eq!(created.quote.tax, money("25.00"));
    assert_eq!(created.quote.total, money("225.00"));
}

#[test]
#[serial]
fn test_env_overrides_file_and_builder_overrides_env() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "pricing:\n  default_tax_rate: 5\ndashboard:\n  default_days: 14\n");
    let _tax = EnvGuard::set(DEFAULT_TAX_RATE_ENV, "8");
    let _days = EnvGuard::set(DASHBOARD_DAYS_ENV, "10");

    let from_env = ConfigBuilder::new().with_data_dir(dir.path()).build().unwrap();
    assert_eq!(from_env.default_tax_rate(), Decimal::from(8));
    assert_eq!(from_env.dashboard_days(), 10);

    let overridden = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .with_default_tax_rate(Decimal::from(3))
        .build()
        .unwrap();
    assert_eq!(overridden.default_tax_rate(), Decimal::from(3));

    let db = create_test_database();
    let stats = dashboard_stats(db.connection(), 0, feb(12), &from_env).unwrap();
    assert_eq!(stats.series.len(), 10);
}

#[test]
#[serial]
fn test_invalid_layers_are_rejected() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "pricing:\n  default_tax_rate: 150\n");
    let err = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .skip_env()
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    write_config(&dir, "rooms:\n  - 101\n");
    let err = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .skip_env()
        .build()
        .unwrap_err();
    assert!(err.is_validation() || matches!(err, Error::Configuration(_)));

    let dir = TempDir::new().unwrap();
    let _tax = EnvGuard::set(DEFAULT_TAX_RATE_ENV, "lots");
    assert!(ConfigBuilder::new().with_data_dir(dir.path()).build().is_err());
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .skip_env()
        .build()
        .unwrap();
    assert_eq!(config.default_tax_rate(), Decimal::ZERO);
    assert_eq!(config.dashboard_days(), 30);
    assert_eq!(config.busy_timeout_seconds(), 5);
}
