//! Inventory browser state and key handling.
//!
//! The browser shows one flat list: each category header followed by its
//! items. Deletions go straight through the store, so the list is rebuilt
//! from the store on every frame. The status line is fed by a store observer.

use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{today, Inventory, Item};
use crate::store::{Change, InventoryObserver, InventoryStore};

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A category header
    Category(String),
    /// An item inside a category
    Item {
        /// Category label
        category: String,
        /// Item id
        id: String,
    },
}

/// Turns store changes into status line messages.
struct StatusFeed(Sender<String>);

impl InventoryObserver for StatusFeed {
    fn on_change(&mut self, change: &Change, _inventory: &Inventory) {
        let message = match change {
            Change::CategoryAdded { label } => format!("Added category {label}"),
            Change::CategoryRemoved {
                label,
                items_removed,
            } => format!(
                "Deleted category {label} ({items_removed} item{})",
                if *items_removed == 1 { "" } else { "s" }
            ),
            Change::ItemAdded { category, .. } => format!("Added an item to {category}"),
            Change::ItemRemoved { category, name, .. } => format!("Deleted {name} from {category}"),
            Change::ItemImageSet { .. } => return,
            Change::Replaced { categories, items } => {
                format!("Loaded {categories} categories and {items} items")
            }
        };
        // The browser may already be gone
        let _ = self.0.send(message);
    }
}

/// State of the inventory browser.
pub struct Browser {
    store: InventoryStore,
    selected: usize,
    status: Option<String>,
    updates: Receiver<String>,
    today: NaiveDate,
}

impl Browser {
    /// Creates a browser over `store` with the first row selected.
    pub fn new(mut store: InventoryStore) -> Self {
        let (sender, updates) = mpsc::channel();
        store.subscribe(Box::new(StatusFeed(sender)));

        Self {
            store,
            selected: 0,
            status: None,
            updates,
            today: today(),
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Index of the selected row.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Last status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Date used to mark items as expired.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Rows in display order.
    pub fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for label in self.store.categories() {
            rows.push(Row::Category(label.clone()));
            rows.extend(self.store.items(label).iter().map(|item| Row::Item {
                category: label.clone(),
                id: item.id.clone(),
            }));
        }
        rows
    }

    /// Looks up the item a row points at.
    pub fn item_for(&self, row: &Row) -> Option<&Item> {
        match row {
            Row::Item { category, id } => self.store.find_item(category, id),
            Row::Category(_) => None,
        }
    }

    /// Handles one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q') | KeyCode::Esc, _) => return Ok(true),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Ok(true),
            (KeyCode::Char('j') | KeyCode::Down, _) => self.move_selection(1),
            (KeyCode::Char('k') | KeyCode::Up, _) => self.move_selection(-1),
            (KeyCode::Char('d'), _) => self.delete_selected_item()?,
            (KeyCode::Char('D'), _) => self.delete_selected_category()?,
            _ => {}
        }
        self.drain_updates();
        Ok(false)
    }

    fn drain_updates(&mut self) {
        while let Ok(message) = self.updates.try_recv() {
            self.status = Some(message);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn delete_selected_item(&mut self) -> Result<()> {
        let Some(Row::Item { category, id }) = self.rows().get(self.selected).cloned() else {
            self.status = Some("Select an item to delete it".to_string());
            return Ok(());
        };

        self.store.remove_item(&category, &id)?;
        self.clamp_selection();
        Ok(())
    }

    fn delete_selected_category(&mut self) -> Result<()> {
        let label = match self.rows().get(self.selected) {
            Some(Row::Category(label) | Row::Item { category: label, .. }) => label.clone(),
            None => return Ok(()),
        };

        self.store.remove_category(&label)?;
        self.clamp_selection();
        Ok(())
    }
}
