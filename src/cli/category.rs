//! Category management commands.
//!
//! Provides commands to list, add, and remove inventory categories.

use crate::cli::common::{print_json, save_error, AppContext, CliResult};
use crate::models::today;
use crate::store::Change;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage categories
#[derive(Debug, Clone, Args)]
pub struct CategoryArgs {
    /// Category subcommand
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum CategoryCommand {
    /// List all categories
    List(ListCategoriesArgs),
    /// Add a new category
    Add(AddCategoryArgs),
    /// Remove a category and every item in it
    Remove(RemoveCategoryArgs),
}

/// List all categories
#[derive(Debug, Clone, Args)]
pub struct ListCategoriesArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Add a new category
#[derive(Debug, Clone, Args)]
pub struct AddCategoryArgs {
    /// Category label (e.g. "Dairy")
    #[arg(value_name = "LABEL")]
    pub label: String,
}

/// Remove a category
#[derive(Debug, Clone, Args)]
pub struct RemoveCategoryArgs {
    /// Category label to remove
    #[arg(value_name = "LABEL")]
    pub label: String,
}

// JSON response types
#[derive(Debug, Serialize)]
struct CategorySummary {
    label: String,
    item_count: usize,
    expired_count: usize,
}

#[derive(Debug, Serialize)]
struct ListCategoriesResponse {
    categories: Vec<CategorySummary>,
    count: usize,
}

impl CategoryArgs {
    /// Execute the category command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        match &self.command {
            CategoryCommand::List(args) => args.execute(ctx),
            CategoryCommand::Add(args) => args.execute(ctx),
            CategoryCommand::Remove(args) => args.execute(ctx),
        }
    }
}

impl ListCategoriesArgs {
    /// Execute the list command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let today = today();

        let categories: Vec<CategorySummary> = store
            .categories()
            .iter()
            .map(|label| {
                let items = store.items(label);
                CategorySummary {
                    label: label.clone(),
                    item_count: items.len(),
                    expired_count: items.iter().filter(|i| i.is_expired_on(today)).count(),
                }
            })
            .collect();

        let response = ListCategoriesResponse {
            count: categories.len(),
            categories,
        };

        if self.json {
            print_json(&response)?;
        } else if response.count == 0 {
            println!("No categories defined.");
        } else {
            println!("Categories ({}):", response.count);
            println!();
            for cat in response.categories {
                let expired = if cat.expired_count > 0 {
                    format!("  ({} expired)", cat.expired_count)
                } else {
                    String::new()
                };
                println!("  {:<24} {:>3} items{}", cat.label, cat.item_count, expired);
            }
        }

        Ok(())
    }
}

impl AddCategoryArgs {
    /// Execute the add command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let label = self.label.as_str();

        match store.add_category(label).map_err(save_error)? {
            Some(_) => println!("Category '{label}' added."),
            None if label.is_empty() => println!("Category label is empty; nothing changed."),
            None => println!("Category '{label}' already exists; nothing changed."),
        }

        Ok(())
    }
}

impl RemoveCategoryArgs {
    /// Execute the remove command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;

        match store.remove_category(&self.label).map_err(save_error)? {
            Some(Change::CategoryRemoved { items_removed, .. }) => println!(
                "Category '{}' removed ({} item{} deleted).",
                self.label,
                items_removed,
                if items_removed == 1 { "" } else { "s" }
            ),
            _ => println!("Category '{}' not found; nothing changed.", self.label),
        }

        Ok(())
    }
}
