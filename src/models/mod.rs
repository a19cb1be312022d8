//! Data models for the inventory.
//!
//! Models are independent of storage, UI and network concerns.

pub mod inventory;
pub mod item;

pub use inventory::Inventory;
pub use item::{is_expired, is_expired_at, parse_expiration_date, today, Item, DATE_FORMAT};
