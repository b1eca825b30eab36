//! Integration tests for global CLI options and configuration layering.
//!
//! - --quiet flag
//! - --data-dir override and INNKEEP_DATA_DIR
//! - config.yaml in the data directory
//! - INNKEEP_DEFAULT_TAX_RATE overriding the file

mod common;

use common::TestEnv;
use predicates::prelude::*;

fn reserve_args<'a>(room: &'a str) -> [&'a str; 11] {
    [
        "reserve",
        "--room",
        room,
        "--check-in",
        "2030-02-10",
        "--check-out",
        "2030-02-15",
        "--guest-name",
        "Ada",
        "--contact",
        "0771",
    ]
}

#[test]
fn test_quiet_suppresses_status_lines() {
    let env = TestEnv::new();

    env.command()
        .args(["--quiet", "room", "add", "101", "--type", "Standard", "--rate", "100"])
        .assert()
        .success()
        .stdout("101\n")
        .stderr(predicate::str::is_empty());

    env.command()
        .args(["room", "add", "102", "--type", "Standard", "--rate", "100"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Added room 102"));
}

#[test]
fn test_data_dir_from_environment() {
    let env = TestEnv::new();

    env.command_bare()
        .env("INNKEEP_DATA_DIR", &env.data_dir)
        .args(["--quiet", "room", "add", "101", "--type", "Standard", "--rate", "100"])
        .assert()
        .success();

    assert!(env.data_dir.join("innkeep.db").exists());
    env.command()
        .args(["room", "show", "101"])
        .assert()
        .success();
}

#[test]
fn test_separate_data_dirs_are_isolated() {
    let first = TestEnv::new();
    let second = TestEnv::new();
    first.add_room("101", "100");

    second
        .command()
        .args(["room", "show", "101"])
        .assert()
        .code(8);
}

#[test]
fn test_config_file_tax_rate_and_currency() {
    let env = TestEnv::new();
    env.write_config("pricing:\n  default_tax_rate: 10\n  currency: USD\n");
    env.add_room("101", "100");

    env.command()
        .args(reserve_args("101"))
        .assert()
        .success()
        .stderr(predicate::str::contains("total 550.00 USD"));
}

#[test]
fn test_environment_overrides_config_file() {
    let env = TestEnv::new();
    env.write_config("pricing:\n  default_tax_rate: 10\n");
    env.add_room("101", "100");

    let output = env
        .command()
        .env("INNKEEP_DEFAULT_TAX_RATE", "20")
        .args(reserve_args("101"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let csv = env.stdout_of(&["show", "RES-20300210-001", "--format", "csv"]);
    assert!(csv.contains("600.00"));
}

#[test]
fn test_explicit_tax_rate_beats_configuration() {
    let env = TestEnv::new();
    env.write_config("pricing:\n  default_tax_rate: 10\n");
    env.add_room("101", "100");

    env.command()
        .args(reserve_args("101"))
        .args(["--tax-rate", "0"])
        .assert()
        .success();

    let csv = env.stdout_of(&["show", "RES-20300210-001", "--format", "csv"]);
    assert!(csv.contains("500.00"));
}

#[test]
fn test_output_format_from_environment() {
    let env = TestEnv::new();
    env.add_room("101", "100");
    env.reserve("101", "2030-02-10", "2030-02-11");

    let output = env
        .command()
        .env("INNKEEP_OUTPUT_FORMAT", "json")
        .arg("list")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
}
