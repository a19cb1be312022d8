//! Export command for writing the inventory as a JSON document.

use crate::cli::common::{AppContext, CliError, CliResult};
use crate::codec::{self, EXPORT_FILE_NAME};
use clap::Args;
use std::path::PathBuf;

/// Export the whole inventory to a JSON file
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output path (defaults to fridge_inventory.json in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));

        codec::export_to_file(store.inventory(), &output_path)
            .map_err(|e| CliError::io(format!("Failed to export inventory: {e}")))?;

        println!(
            "Exported {} categories and {} items to {}",
            store.categories().len(),
            store.inventory().item_count(),
            output_path.display()
        );

        Ok(())
    }
}
