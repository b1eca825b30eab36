//! Common test utilities for CLI integration tests.
//!
//! Every test gets its own data directory, and the `INNKEEP_*` variables of
//! the surrounding shell are scrubbed so they cannot leak into a run.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Variables the CLI or library read from the environment.
const SCRUBBED_ENV: &[&str] = &[
    "INNKEEP_DATA_DIR",
    "INNKEEP_DEFAULT_TAX_RATE",
    "INNKEEP_BUSY_TIMEOUT",
    "INNKEEP_DASHBOARD_DAYS",
    "INNKEEP_DISABLE_AUTOINIT",
    "INNKEEP_LOG_MODE",
    "INNKEEP_OUTPUT_FORMAT",
    "INNKEEP_USER_ID",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the innkeep data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the first command initializes it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("innkeep-data");

        Self { temp_dir, data_dir }
    }

    /// Get a bare command builder without `--data-dir`.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").expect("Failed to find innkeep binary");
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, content: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), content)
            .expect("Failed to write config");
    }

    /// Add a Standard room.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn add_room(&self, number: &str, rate: &str) {
        self.command()
            .args(["--quiet", "room", "add", number, "--type", "Standard", "--rate", rate])
            .assert()
            .success();
    }

    /// Book a room for a new guest and return the reservation number.
    ///
    /// # Panics
    /// Panics if the reserve command fails.
    pub fn reserve(&self, room: &str, check_in: &str, check_out: &str) -> String {
        let output = self
            .command()
            .args([
                "--quiet",
                "reserve",
                "--room",
                room,
                "--check-in",
                check_in,
                "--check-out",
                check_out,
                "--guest-name",
                "Ada Lovelace",
                "--contact",
                "0771234567",
            ])
            .output()
            .expect("Failed to run reserve command");

        assert!(
            output.status.success(),
            "Reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Record a payment and return its id.
    ///
    /// # Panics
    /// Panics if the pay command fails.
    pub fn pay(&self, reservation: &str, amount: &str) -> i64 {
        let output = self
            .command()
            .args(["--quiet", "pay", reservation, "--amount", amount])
            .output()
            .expect("Failed to run pay command");

        assert!(
            output.status.success(),
            "Pay failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .parse()
            .expect("Output is not a payment id")
    }

    /// Run a command and return its stdout, asserting success.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run command");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
