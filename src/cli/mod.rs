//! CLI command handlers for Fridgify.
//!
//! Every command loads the inventory from the data directory, applies one
//! operation through the store and exits. Exit codes: 0 success,
//! 1 invalid input, 2 storage or filesystem failure.

#[cfg(feature = "ratatui")]
pub mod browse;
pub mod category;
pub mod common;
pub mod config;
pub mod export;
pub mod import;
pub mod item;
#[cfg(feature = "web")]
pub mod serve;

// Re-export types used by main.rs and tests
#[cfg(feature = "ratatui")]
pub use browse::BrowseArgs;
pub use category::CategoryArgs;
pub use common::{AppContext, CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use import::ImportArgs;
pub use item::ItemArgs;
#[cfg(feature = "web")]
pub use serve::ServeArgs;
