//! Import command for replacing the inventory from a JSON document.

use crate::cli::common::{save_error, AppContext, CliError, CliResult};
use crate::codec::{self, CodecError};
use crate::store::Change;
use clap::Args;
use std::path::PathBuf;

/// Replace the whole inventory with the contents of an exported JSON file
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// File previously written by `export`
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl ImportArgs {
    /// Execute the import command
    ///
    /// The current inventory is left untouched when the file cannot be read
    /// or parsed.
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let inventory = codec::import_from_file(&self.file).map_err(|e| match e {
            CodecError::Parse(_) => CliError::validation(format!(
                "Error importing data. Please check the file format. ({e})"
            )),
            other => CliError::io(other.to_string()),
        })?;

        let mut store = ctx.open_store()?;
        let change = store.replace(inventory).map_err(save_error)?;

        if let Change::Replaced { categories, items } = change {
            println!(
                "Imported {categories} categories and {items} items from {}",
                self.file.display()
            );
        }

        Ok(())
    }
}
