//! JSON export and import of the whole inventory.
//!
//! The document shape is
//! `{ "categories": [string], "items": { "<category>": [Item] } }`,
//! pretty-printed with two-space indentation. There is no version field.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Inventory;

/// Default file name for exports.
pub const EXPORT_FILE_NAME: &str = "fridge_inventory.json";

/// Errors raised while reading or writing export documents.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document is not valid JSON or does not have the inventory shape.
    #[error("invalid inventory document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The import file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The export file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File that failed to write
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Serializes the inventory as an indented JSON document.
pub fn export_json(inventory: &Inventory) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(inventory)?)
}

/// Parses an export document.
///
/// Nothing beyond structural parsing is checked: the parsed value replaces the
/// current state wholesale.
pub fn import_json(text: &str) -> Result<Inventory, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Writes an export document to `path`.
pub fn export_to_file(inventory: &Inventory, path: &Path) -> Result<(), CodecError> {
    let json = export_json(inventory)?;
    fs::write(path, json).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses an export document from `path`.
pub fn import_from_file(path: &Path) -> Result<Inventory, CodecError> {
    let text = fs::read_to_string(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add_category("Dairy");
        inventory.add_category("Leftovers");
        inventory.push_item(Item {
            id: "1704067200000".to_string(),
            category: "Dairy".to_string(),
            name: "Greek Yogurt".to_string(),
            quantity: 4,
            expiration_date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            image_url: None,
        });
        inventory
    }

    #[test]
    fn test_export_is_indented() {
        let json = export_json(&sample_inventory()).unwrap();
        assert!(json.starts_with("{\n  \"categories\": ["));
        assert!(json.contains("\"expirationDate\": \"2024-01-09\""));
        assert!(json.contains("\"imageUrl\": null"));
    }

    #[test]
    fn test_export_then_import_reproduces_state() {
        let inventory = sample_inventory();
        let imported = import_json(&export_json(&inventory).unwrap()).unwrap();
        assert_eq!(imported, inventory);
    }

    #[test]
    fn test_import_produce_document() {
        let imported = import_json(r#"{"categories":["Produce"],"items":{"Produce":[]}}"#).unwrap();
        assert_eq!(imported.categories, vec!["Produce"]);
        assert_eq!(imported.items.len(), 1);
        assert!(imported.items["Produce"].is_empty());
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(matches!(import_json("{\"categories\": ["), Err(CodecError::Parse(_))));
        assert!(matches!(import_json("not json at all"), Err(CodecError::Parse(_))));
    }

    #[test]
    fn test_import_rejects_wrong_shape() {
        assert!(import_json(r#"{"categories":"Dairy","items":{}}"#).is_err());
        assert!(import_json(r#"{"categories":[],"items":{"Dairy":[{"name":"Milk"}]}}"#).is_err());
    }

    #[test]
    fn test_import_accepts_loose_quantities() {
        let document = r#"{
            "categories": ["Dairy"],
            "items": {"Dairy": [
                {"id": "1", "category": "Dairy", "name": "Milk", "quantity": null, "expirationDate": "2030-01-01", "imageUrl": null},
                {"id": "2", "category": "Dairy", "name": "Eggs", "quantity": -2, "expirationDate": "2030-01-01", "imageUrl": null}
            ]}
        }"#;

        let imported = import_json(document).unwrap();
        let quantities: Vec<i64> = imported.items_in("Dairy").iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![0, -2]);

        let exported = export_json(&imported).unwrap();
        assert_eq!(import_json(&exported).unwrap(), imported);
    }

    #[test]
    fn test_export_keeps_category_order() {
        let mut inventory = Inventory::new();
        inventory.add_category("Dairy");
        inventory.add_category("B");
        inventory.add_category("A");

        let json = export_json(&inventory).unwrap();
        let items = &json[json.find("\"items\"").unwrap()..];
        let dairy = items.find("\"Dairy\"").unwrap();
        let b = items.find("\"B\"").unwrap();
        let a = items.find("\"A\"").unwrap();
        assert!(dairy < b && b < a);

        let reimported = import_json(&json).unwrap();
        let keys: Vec<&str> = reimported.items.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Dairy", "B", "A"]);
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(EXPORT_FILE_NAME);

        export_to_file(&sample_inventory(), &path).unwrap();
        assert_eq!(import_from_file(&path).unwrap(), sample_inventory());
    }

    #[test]
    fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = import_from_file(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CodecError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
