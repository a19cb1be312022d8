//! Shared CLI plumbing: errors, exit codes and store access.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::storage::FileStore;
use crate::store::InventoryStore;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input or a rejected operation
    Validation = 1,
    /// Filesystem, storage or network failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid user input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// Storage or filesystem failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Loaded configuration
    pub config: Config,
    /// Resolved inventory data directory
    pub data_dir: PathBuf,
}

impl AppContext {
    /// Loads configuration and resolves the data directory.
    ///
    /// `data_dir_override` (the `--data-dir` flag) wins over the config file.
    pub fn load(data_dir_override: Option<PathBuf>) -> CliResult<Self> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let data_dir = match data_dir_override {
            Some(dir) => dir,
            None => config
                .data_dir()
                .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?,
        };

        Ok(Self { config, data_dir })
    }

    /// Opens the inventory store in the data directory.
    pub fn open_store(&self) -> CliResult<InventoryStore> {
        InventoryStore::open(Box::new(FileStore::new(&self.data_dir)))
            .map_err(|e| CliError::io(format!("Failed to load inventory: {e:#}")))
    }
}

/// Prints `value` as a single line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Maps a storage error raised while saving a mutation.
pub fn save_error(e: anyhow::Error) -> CliError {
    CliError::io(format!("Failed to save inventory: {e:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("bad").exit_code(), 1);
        assert_eq!(CliError::io("disk").exit_code(), 2);
    }

    #[test]
    fn test_display_is_message() {
        assert_eq!(CliError::validation("Category name is empty").to_string(), "Category name is empty");
    }
}
