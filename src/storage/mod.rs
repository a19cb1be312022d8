//! Durable local key-value storage and the persistence mirror.
//!
//! The inventory is stored under two string-valued keys, each holding JSON:
//!
//! - [`CATEGORIES_KEY`]: the ordered category list
//! - [`ITEMS_KEY`]: the category-to-items mapping
//!
//! [`PersistenceMirror`] reads both keys once at startup and rewrites both after
//! every mutation. Backends only need to implement [`KeyValueStore`].

pub mod file;
pub mod memory;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::Inventory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key for the category list.
pub const CATEGORIES_KEY: &str = "categories";

/// Storage key for the item mapping.
pub const ITEMS_KEY: &str = "items";

/// A durable, string-valued key-value store.
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Mirrors an [`Inventory`] into a [`KeyValueStore`].
pub struct PersistenceMirror {
    backend: Box<dyn KeyValueStore>,
}

impl PersistenceMirror {
    /// Wraps a storage backend.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Reads the stored inventory.
    ///
    /// Each key is read independently: a missing key yields an empty value for
    /// that half of the state. A present but unparseable value is an error.
    pub fn load(&self) -> Result<Inventory> {
        let mut inventory = Inventory::new();

        if let Some(raw) = self.backend.get(CATEGORIES_KEY)? {
            inventory.categories = serde_json::from_str::<Vec<String>>(&raw)
                .with_context(|| format!("Stored '{CATEGORIES_KEY}' entry is not valid JSON"))?;
        }

        if let Some(raw) = self.backend.get(ITEMS_KEY)? {
            inventory.items = serde_json::from_str(&raw)
                .with_context(|| format!("Stored '{ITEMS_KEY}' entry is not valid JSON"))?;
        }

        debug!(
            categories = inventory.categories.len(),
            items = inventory.item_count(),
            "Loaded inventory from storage"
        );

        Ok(inventory)
    }

    /// Rewrites both storage entries from `inventory`.
    pub fn save(&mut self, inventory: &Inventory) -> Result<()> {
        let categories = serde_json::to_string(&inventory.categories)
            .context("Failed to serialize categories")?;
        let items =
            serde_json::to_string(&inventory.items).context("Failed to serialize items")?;

        self.backend
            .set(CATEGORIES_KEY, &categories)
            .with_context(|| format!("Failed to write '{CATEGORIES_KEY}' to storage"))?;
        self.backend
            .set(ITEMS_KEY, &items)
            .with_context(|| format!("Failed to write '{ITEMS_KEY}' to storage"))?;

        debug!(
            categories = inventory.categories.len(),
            items = inventory.item_count(),
            "Saved inventory to storage"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use chrono::NaiveDate;

    fn sample_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add_category("Dairy");
        inventory.add_category("Produce");
        inventory.push_item(Item {
            id: "1700000000000".to_string(),
            category: "Dairy".to_string(),
            name: "Milk".to_string(),
            quantity: 2,
            expiration_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            image_url: Some("https://cdn.example/milk.jpg".to_string()),
        });
        inventory
    }

    #[test]
    fn test_load_empty_storage() {
        let mirror = PersistenceMirror::new(Box::new(MemoryStore::new()));
        let inventory = mirror.load().unwrap();
        assert_eq!(inventory, Inventory::new());
    }

    #[test]
    fn test_save_writes_both_keys() {
        let store = MemoryStore::new();
        let mut mirror = PersistenceMirror::new(Box::new(store.clone()));

        mirror.save(&sample_inventory()).unwrap();

        let categories = store.get(CATEGORIES_KEY).unwrap().unwrap();
        assert_eq!(categories, r#"["Dairy","Produce"]"#);

        let items: serde_json::Value =
            serde_json::from_str(&store.get(ITEMS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(items["Dairy"][0]["name"], "Milk");
        assert_eq!(items["Produce"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut mirror = PersistenceMirror::new(Box::new(MemoryStore::new()));
        let inventory = sample_inventory();

        mirror.save(&inventory).unwrap();
        assert_eq!(mirror.load().unwrap(), inventory);
    }

    #[test]
    fn test_load_only_categories_present() {
        let mut store = MemoryStore::new();
        store.set(CATEGORIES_KEY, r#"["Dairy"]"#).unwrap();

        let inventory = PersistenceMirror::new(Box::new(store)).load().unwrap();
        assert_eq!(inventory.categories, vec!["Dairy"]);
        assert!(inventory.items.is_empty());
    }

    #[test]
    fn test_load_malformed_entry_names_the_key() {
        let mut store = MemoryStore::new();
        store.set(ITEMS_KEY, "{not json").unwrap();

        let err = PersistenceMirror::new(Box::new(store)).load().unwrap_err();
        assert!(format!("{err:#}").contains("'items'"));
    }
}
