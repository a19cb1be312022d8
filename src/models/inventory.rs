//! The inventory state tree: an ordered category list plus per-category item lists.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::Item;

/// Whole inventory state.
///
/// This is the shape written to storage and to export files:
/// `{ "categories": [...], "items": { "<category>": [Item, ...] } }`.
///
/// # Invariants
///
/// - `categories` holds no duplicate labels and keeps creation order
/// - every item is filed under a label present in `categories`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Category labels in creation order
    pub categories: Vec<String>,
    /// Items keyed by category label, in the order categories were created
    pub items: IndexMap<String, Vec<Item>>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether `label` is a known category.
    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    /// Items filed under `category`, empty if the category has none or is unknown.
    pub fn items_in(&self, category: &str) -> &[Item] {
        self.items.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Looks up an item by category and id.
    pub fn find_item(&self, category: &str, id: &str) -> Option<&Item> {
        self.items_in(category).iter().find(|item| item.id == id)
    }

    /// Total number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Iterates items in display order (category order, then insertion order).
    pub fn iter_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.categories
            .iter()
            .flat_map(move |category| self.items_in(category).iter())
    }

    /// All items that expired before `today`, in display order.
    pub fn expired_items(&self, today: NaiveDate) -> Vec<&Item> {
        self.iter_items()
            .filter(|item| item.is_expired_on(today))
            .collect()
    }

    /// Adds a category with an empty item list.
    ///
    /// Returns false (and changes nothing) if the label is empty or already present.
    pub fn add_category(&mut self, label: &str) -> bool {
        if label.is_empty() || self.has_category(label) {
            return false;
        }

        self.categories.push(label.to_string());
        self.items.insert(label.to_string(), Vec::new());
        true
    }

    /// Removes a category together with every item filed under it.
    ///
    /// Returns the removed items, or `None` if the category did not exist.
    pub fn remove_category(&mut self, label: &str) -> Option<Vec<Item>> {
        let position = self.categories.iter().position(|c| c == label);
        let removed = self.items.shift_remove(label);

        if position.is_none() && removed.is_none() {
            return None;
        }

        if let Some(position) = position {
            self.categories.remove(position);
        }

        Some(removed.unwrap_or_default())
    }

    /// Appends an item to its category's list.
    ///
    /// Returns false if the item's category does not exist.
    pub fn push_item(&mut self, item: Item) -> bool {
        if !self.has_category(&item.category) {
            return false;
        }

        self.items.entry(item.category.clone()).or_default().push(item);
        true
    }

    /// Removes the item with `id` from `category`.
    pub fn remove_item(&mut self, category: &str, id: &str) -> Option<Item> {
        let items = self.items.get_mut(category)?;
        let position = items.iter().position(|item| item.id == id)?;
        Some(items.remove(position))
    }

    /// Sets the image of an existing item. Returns false if the item is gone.
    pub fn set_item_image(&mut self, category: &str, id: &str, image_url: Option<String>) -> bool {
        let Some(item) = self
            .items
            .get_mut(category)
            .and_then(|items| items.iter_mut().find(|item| item.id == id))
        else {
            return false;
        };

        item.image_url = image_url;
        true
    }
}
