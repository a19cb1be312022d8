//! The inventory store: the single owner and mutator of inventory state.
//!
//! Every mutation follows the same path: validate (silently ignoring
//! incomplete or duplicate input), apply to the in-memory [`Inventory`],
//! rewrite storage through the [`PersistenceMirror`], then publish a
//! [`Change`] to subscribed observers. No-ops return `Ok(None)` and neither
//! touch storage nor notify anyone.
//!
//! Adding an item is a two-phase write. [`InventoryStore::add_item`] commits
//! the record with no image; [`InventoryStore::set_item_image`] patches the
//! image in later. [`InventoryStore::add_item_enriched`] runs both phases
//! around an [`ImageSearch`] lookup.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::enrichment::ImageSearch;
use crate::models::{Inventory, Item};
use crate::storage::{KeyValueStore, PersistenceMirror};

/// A state change that was applied and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A category was created
    CategoryAdded {
        /// New category label
        label: String,
    },
    /// A category and all of its items were deleted
    CategoryRemoved {
        /// Removed category label
        label: String,
        /// Number of items deleted with it
        items_removed: usize,
    },
    /// An item was appended to a category
    ItemAdded {
        /// Category label
        category: String,
        /// Generated item id
        id: String,
    },
    /// An item was deleted
    ItemRemoved {
        /// Category label
        category: String,
        /// Deleted item id
        id: String,
        /// Name of the deleted item
        name: String,
    },
    /// An item's image was set after enrichment
    ItemImageSet {
        /// Category label
        category: String,
        /// Item id
        id: String,
    },
    /// The whole state was replaced by an import
    Replaced {
        /// Number of categories after the import
        categories: usize,
        /// Number of items after the import
        items: usize,
    },
}

/// Receives every applied [`Change`] together with the resulting state.
pub trait InventoryObserver: Send {
    /// Called after the change has been persisted.
    fn on_change(&mut self, change: &Change, inventory: &Inventory);
}

/// Input for [`InventoryStore::add_item`].
///
/// Fields mirror an "add item" form: anything may be blank. Blank input makes
/// the add a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Target category label
    pub category: String,
    /// Item name
    pub name: String,
    /// Units on hand (must be positive)
    pub quantity: u32,
    /// Expiration date, if one was entered
    pub expiration_date: Option<NaiveDate>,
}

/// Generates item ids from the millisecond clock.
///
/// Ids are strictly increasing: two items created within the same millisecond
/// still get distinct ids.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Seeds the generator past every numeric id already in `inventory`.
    fn seeded_from(inventory: &Inventory) -> Self {
        let last = inventory
            .iter_items()
            .filter_map(|item| item.id.parse::<i64>().ok())
            .max()
            .unwrap_or_default();
        Self { last }
    }

    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        // An imported id of i64::MAX leaves nowhere to go but back to the clock
        self.last = self.last.checked_add(1).map_or(now, |next| now.max(next));
        self.last.to_string()
    }
}

/// Owns the inventory, its storage mirror and its observers.
pub struct InventoryStore {
    inventory: Inventory,
    mirror: PersistenceMirror,
    observers: Vec<Box<dyn InventoryObserver>>,
    ids: IdGenerator,
}

impl InventoryStore {
    /// Opens a store, loading whatever the backend holds (empty if nothing).
    pub fn open(backend: Box<dyn KeyValueStore>) -> Result<Self> {
        let mirror = PersistenceMirror::new(backend);
        let inventory = mirror.load()?;
        let ids = IdGenerator::seeded_from(&inventory);

        Ok(Self {
            inventory,
            mirror,
            observers: Vec::new(),
            ids,
        })
    }

    /// Current state.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Category labels in creation order.
    pub fn categories(&self) -> &[String] {
        &self.inventory.categories
    }

    /// Items in `category` (empty when unknown).
    pub fn items(&self, category: &str) -> &[Item] {
        self.inventory.items_in(category)
    }

    /// Looks up one item.
    pub fn find_item(&self, category: &str, id: &str) -> Option<&Item> {
        self.inventory.find_item(category, id)
    }

    /// Items that expired before `today`, in display order.
    pub fn expired_items(&self, today: NaiveDate) -> Vec<&Item> {
        self.inventory.expired_items(today)
    }

    /// Registers an observer for subsequent changes.
    pub fn subscribe(&mut self, observer: Box<dyn InventoryObserver>) {
        self.observers.push(observer);
    }

    /// Adds a category. No-op for empty or duplicate labels.
    pub fn add_category(&mut self, label: &str) -> Result<Option<Change>> {
        if !self.inventory.add_category(label) {
            return Ok(None);
        }

        self.commit(Change::CategoryAdded {
            label: label.to_string(),
        })
    }

    /// Deletes a category and every item in it. No-op if it does not exist.
    pub fn remove_category(&mut self, label: &str) -> Result<Option<Change>> {
        let Some(removed) = self.inventory.remove_category(label) else {
            return Ok(None);
        };

        self.commit(Change::CategoryRemoved {
            label: label.to_string(),
            items_removed: removed.len(),
        })
    }

    /// Commits a new item with no image (first phase of an add).
    ///
    /// No-op when the category, name or expiration date is missing, when the
    /// quantity is zero, or when the category does not exist.
    pub fn add_item(&mut self, new_item: NewItem) -> Result<Option<Change>> {
        let NewItem {
            category,
            name,
            quantity,
            expiration_date,
        } = new_item;

        let Some(expiration_date) = expiration_date else {
            return Ok(None);
        };

        if category.is_empty()
            || name.is_empty()
            || quantity == 0
            || !self.inventory.has_category(&category)
        {
            return Ok(None);
        }

        let mut id = self.ids.next_id();
        while self.inventory.iter_items().any(|item| item.id == id) {
            id = self.ids.next_id();
        }
        let item = Item {
            id: id.clone(),
            category: category.clone(),
            name,
            quantity: i64::from(quantity),
            expiration_date,
            image_url: None,
        };

        if !self.inventory.push_item(item) {
            return Ok(None);
        }

        self.commit(Change::ItemAdded { category, id })
    }

    /// Sets an item's image (second phase of an add).
    ///
    /// No-op when the item has been removed in the meantime or `image_url` is `None`.
    pub fn set_item_image(
        &mut self,
        category: &str,
        id: &str,
        image_url: Option<String>,
    ) -> Result<Option<Change>> {
        if image_url.is_none() || !self.inventory.set_item_image(category, id, image_url) {
            return Ok(None);
        }

        self.commit(Change::ItemImageSet {
            category: category.to_string(),
            id: id.to_string(),
        })
    }

    /// Adds an item, then looks up and attaches its image.
    ///
    /// Returns the [`Change::ItemAdded`] of the first phase. A failed lookup
    /// leaves the item without an image.
    pub async fn add_item_enriched<S: ImageSearch>(
        &mut self,
        search: &S,
        new_item: NewItem,
    ) -> Result<Option<Change>> {
        let name = new_item.name.clone();
        let added = self.add_item(new_item)?;

        if let Some(Change::ItemAdded { category, id }) = &added {
            let image_url = search.find_image(&name).await;
            self.set_item_image(category, id, image_url)?;
        }

        Ok(added)
    }

    /// Deletes an item. No-op if it is not in `category`.
    pub fn remove_item(&mut self, category: &str, id: &str) -> Result<Option<Change>> {
        let Some(removed) = self.inventory.remove_item(category, id) else {
            return Ok(None);
        };

        self.commit(Change::ItemRemoved {
            category: category.to_string(),
            id: id.to_string(),
            name: removed.name,
        })
    }

    /// Replaces the whole state (import).
    pub fn replace(&mut self, inventory: Inventory) -> Result<Change> {
        self.ids = IdGenerator::seeded_from(&inventory);
        let change = Change::Replaced {
            categories: inventory.categories.len(),
            items: inventory.item_count(),
        };
        self.inventory = inventory;
        self.persist_and_notify(&change)?;
        Ok(change)
    }

    fn commit(&mut self, change: Change) -> Result<Option<Change>> {
        self.persist_and_notify(&change)?;
        Ok(Some(change))
    }

    fn persist_and_notify(&mut self, change: &Change) -> Result<()> {
        info!(?change, "Inventory changed");
        self.mirror.save(&self.inventory)?;

        for observer in &mut self.observers {
            observer.on_change(change, &self.inventory);
        }

        Ok(())
    }
}
