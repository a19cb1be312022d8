//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use fridgify::models::{Inventory, Item, DATE_FORMAT};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the fridgify binary (set by cargo at compile time)
pub fn fridgify_bin() -> &'static str {
    env!("CARGO_BIN_EXE_fridgify")
}

/// An isolated data directory and config directory for one test.
pub struct TestEnv {
    /// Inventory data directory (passed as `--data-dir`)
    pub data: TempDir,
    /// Config directory (passed as `FRIDGIFY_CONFIG_DIR`)
    pub config: TempDir,
}

impl TestEnv {
    /// Creates fresh, empty directories.
    pub fn new() -> Self {
        Self {
            data: TempDir::new().expect("Failed to create data dir"),
            config: TempDir::new().expect("Failed to create config dir"),
        }
    }

    /// Path of the data directory.
    pub fn data_dir(&self) -> &Path {
        self.data.path()
    }

    /// A command isolated from the user's config, data and API key.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(fridgify_bin());
        cmd.env("FRIDGIFY_CONFIG_DIR", self.config.path())
            .env_remove("FRIDGIFY_DATA_DIR")
            .env_remove("PIXABAY_API_KEY")
            .env_remove("RUST_LOG")
            .args(args)
            .arg("--data-dir")
            .arg(self.data.path());
        cmd
    }

    /// Runs a command to completion.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs a command and asserts it exited with `code`.
    pub fn run_expecting(&self, args: &[&str], code: i32) -> Output {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(code),
            "`fridgify {}` exited unexpectedly. stdout: {} stderr: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    /// Runs a command, asserts success and parses its stdout as JSON.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run_expecting(args, 0);
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).expect("valid date")
}

/// The one-category, one-item inventory used in import scenarios.
pub fn produce_inventory() -> Inventory {
    let mut inventory = Inventory::new();
    inventory.add_category("Produce");
    inventory.push_item(Item {
        id: "1".to_string(),
        category: "Produce".to_string(),
        name: "Kale".to_string(),
        quantity: 1,
        expiration_date: date("2030-05-01"),
        image_url: None,
    });
    inventory
}

/// Writes `text` to `name` inside a fresh temp dir.
pub fn write_temp_file(name: &str, text: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, text).expect("Failed to write file");
    (path, temp_dir)
}

/// Combined stdout of a command.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
