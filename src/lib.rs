//! Fridgify Library
//!
//! Perishable-inventory tracking: categories of items with quantities and
//! expiration dates, persisted as JSON, optionally enriched with images from
//! the Pixabay search API.

pub mod branding;
pub mod cli;
pub mod codec;
pub mod config;
pub mod enrichment;
pub mod logging;
pub mod models;
pub mod storage;
pub mod store;
#[cfg(feature = "ratatui")]
pub mod tui;
#[cfg(feature = "web")]
pub mod web;
