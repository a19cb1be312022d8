//! Item management commands.

use crate::cli::common::{print_json, save_error, AppContext, CliError, CliResult};
use crate::enrichment::{NoImageSearch, PixabayClient};
use crate::models::{parse_expiration_date, today, Item};
use crate::store::{Change, NewItem};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage items
#[derive(Debug, Clone, Args)]
pub struct ItemArgs {
    /// Item subcommand
    #[command(subcommand)]
    pub command: ItemCommand,
}

/// Item management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ItemCommand {
    /// List items, grouped by category
    List(ListItemsArgs),
    /// Add an item to a category
    Add(AddItemArgs),
    /// Remove an item by id
    Remove(RemoveItemArgs),
    /// List expired items across all categories
    Expired(ExpiredItemsArgs),
}

/// List items
#[derive(Debug, Clone, Args)]
pub struct ListItemsArgs {
    /// Only list items in this category
    #[arg(short, long, value_name = "LABEL")]
    pub category: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Add an item
#[derive(Debug, Clone, Args)]
pub struct AddItemArgs {
    /// Category to file the item under
    #[arg(short, long, value_name = "LABEL")]
    pub category: String,

    /// Item name (also used as the image search query)
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Number of units
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub quantity: u32,

    /// Expiration date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub expires: Option<String>,

    /// Skip the image lookup
    #[arg(long)]
    pub no_image: bool,
}

/// Remove an item
#[derive(Debug, Clone, Args)]
pub struct RemoveItemArgs {
    /// Category the item is filed under
    #[arg(short, long, value_name = "LABEL")]
    pub category: String,

    /// Item id (see `item list`)
    #[arg(long, value_name = "ID")]
    pub id: String,
}

/// List expired items
#[derive(Debug, Clone, Args)]
pub struct ExpiredItemsArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// JSON response types
#[derive(Debug, Serialize)]
struct ItemEntry<'a> {
    #[serde(flatten)]
    item: &'a Item,
    expired: bool,
}

#[derive(Debug, Serialize)]
struct ListItemsResponse<'a> {
    items: Vec<ItemEntry<'a>>,
    count: usize,
}

impl ItemArgs {
    /// Execute the item command
    pub async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        match &self.command {
            ItemCommand::List(args) => args.execute(ctx),
            ItemCommand::Add(args) => args.execute(ctx).await,
            ItemCommand::Remove(args) => args.execute(ctx),
            ItemCommand::Expired(args) => args.execute(ctx),
        }
    }
}

impl ListItemsArgs {
    /// Execute the list command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let today = today();

        let categories: Vec<&String> = match &self.category {
            Some(label) => {
                let known = store.categories().iter().find(|c| *c == label);
                vec![known.ok_or_else(|| {
                    CliError::validation(format!("Category '{label}' not found"))
                })?]
            }
            None => store.categories().iter().collect(),
        };

        if self.json {
            let items: Vec<ItemEntry<'_>> = categories
                .iter()
                .flat_map(|label| store.items(label))
                .map(|item| ItemEntry {
                    item,
                    expired: item.is_expired_on(today),
                })
                .collect();
            return print_json(&ListItemsResponse {
                count: items.len(),
                items,
            });
        }

        if categories.is_empty() {
            println!("No categories defined.");
            return Ok(());
        }

        for label in categories {
            println!("{label}");
            let items = store.items(label);
            if items.is_empty() {
                println!("  No items in this category");
            }
            for item in items {
                println!("  {}", format_item_line(item, item.is_expired_on(today)));
            }
            println!();
        }

        Ok(())
    }
}

impl AddItemArgs {
    /// Execute the add command
    pub async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let expiration_date = match self.expires.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(expires) => Some(
                parse_expiration_date(expires).map_err(|e| CliError::validation(e.to_string()))?,
            ),
        };

        let new_item = NewItem {
            category: self.category.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            expiration_date,
        };

        let mut store = ctx.open_store()?;

        let change = if self.no_image {
            store.add_item_enriched(&NoImageSearch, new_item).await
        } else {
            let search = PixabayClient::from_config(&ctx.config.pixabay)
                .map_err(|e| CliError::io(format!("{e:#}")))?;
            store.add_item_enriched(&search, new_item).await
        }
        .map_err(save_error)?;

        match change {
            Some(Change::ItemAdded { category, id }) => {
                let image = store
                    .find_item(&category, &id)
                    .and_then(|item| item.image_url.as_deref())
                    .unwrap_or("no image");
                println!("Item '{}' added to '{}' (id {}, {}).", self.name, category, id, image);
            }
            _ => println!("Item not added: category, name, quantity and expiration date are required and the category must exist; nothing changed."),
        }

        Ok(())
    }
}

impl RemoveItemArgs {
    /// Execute the remove command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;

        match store.remove_item(&self.category, &self.id).map_err(save_error)? {
            Some(_) => println!("Item {} removed from '{}'.", self.id, self.category),
            None => println!(
                "Item {} not found in '{}'; nothing changed.",
                self.id, self.category
            ),
        }

        Ok(())
    }
}

impl ExpiredItemsArgs {
    /// Execute the expired command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let expired = store.expired_items(today());

        if self.json {
            let items: Vec<ItemEntry<'_>> = expired
                .into_iter()
                .map(|item| ItemEntry {
                    item,
                    expired: true,
                })
                .collect();
            return print_json(&ListItemsResponse {
                count: items.len(),
                items,
            });
        }

        if expired.is_empty() {
            println!("Nothing has expired.");
            return Ok(());
        }

        println!("Expired items ({}):", expired.len());
        println!();
        for item in expired {
            println!("  [{}] {}", item.category, format_item_line(item, true));
        }

        Ok(())
    }
}

/// One human-readable line per item: `Milk - Qty: 2 - Expires: 2024-01-01`.
fn format_item_line(item: &Item, expired: bool) -> String {
    let marker = if expired { " [EXPIRED]" } else { "" };
    format!(
        "{} - Qty: {} - Expires: {}{}  (id {})",
        item.name, item.quantity, item.expiration_date, marker, item.id
    )
}
