//! Inventory items and expiration checks.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Date format used for expiration dates everywhere (storage, export, CLI).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One inventory entry.
///
/// Serialized with camelCase keys so stored and exported documents look like
/// `{"id": "...", "category": "Dairy", "name": "Milk", "quantity": 2,
/// "expirationDate": "2024-01-01", "imageUrl": null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, a millisecond timestamp taken at creation time
    pub id: String,
    /// Label of the category this item is filed under
    pub category: String,
    /// Display name (also the image search query)
    pub name: String,
    /// Number of units on hand
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: i64,
    /// Calendar date the item expires on
    pub expiration_date: NaiveDate,
    /// Representative image, filled in by enrichment when available
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Item {
    /// Returns true if this item expired before `today`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        is_expired_at(self.expiration_date, today)
    }

    /// Returns true if this item expired before the current local date.
    pub fn is_expired(&self) -> bool {
        is_expired(self.expiration_date)
    }
}

/// Reads a quantity as exported by older browser builds.
///
/// An unparseable form entry was written as `null`, and fractional or negative
/// numbers were never rejected. `null` reads as 0; fractions are truncated.
fn lenient_quantity<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.map_or(0, |n| {
        n.as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_default()
    }))
}

/// Returns true if `date` is strictly before `today`.
///
/// The comparison is date-only: an item expiring today is still good.
pub fn is_expired_at(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Returns true if `date` is strictly before the current local date.
pub fn is_expired(date: NaiveDate) -> bool {
    is_expired_at(date, today())
}

/// The current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a `YYYY-MM-DD` expiration date.
pub fn parse_expiration_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid expiration date '{input}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_is_expired_at_past_date() {
        assert!(is_expired_at(date("2024-01-01"), date("2024-01-02")));
        assert!(is_expired_at(date("1999-12-31"), date("2024-06-15")));
    }

    #[test]
    fn test_is_expired_at_same_day_is_not_expired() {
        assert!(!is_expired_at(date("2024-01-01"), date("2024-01-01")));
    }

    #[test]
    fn test_is_expired_at_future_date() {
        assert!(!is_expired_at(date("2024-01-03"), date("2024-01-02")));
    }

    #[test]
    fn test_is_expired_against_wall_clock() {
        assert!(is_expired(date("2024-01-01")));
        assert!(!is_expired(today() + Duration::days(365)));
    }

    #[test]
    fn test_parse_expiration_date() {
        assert_eq!(parse_expiration_date("2024-03-09").unwrap(), date("2024-03-09"));
        assert_eq!(parse_expiration_date(" 2024-03-09 ").unwrap(), date("2024-03-09"));
        assert!(parse_expiration_date("03/09/2024").is_err());
        assert!(parse_expiration_date("2024-02-30").is_err());
        assert!(parse_expiration_date("").is_err());
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item {
            id: "1700000000000".to_string(),
            category: "Dairy".to_string(),
            name: "Milk".to_string(),
            quantity: 2,
            expiration_date: date("2024-01-01"),
            image_url: None,
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "1700000000000");
        assert_eq!(value["expirationDate"], "2024-01-01");
        assert!(value["imageUrl"].is_null());
        assert_eq!(value["quantity"], 2);
    }

    #[test]
    fn test_item_missing_image_url_defaults_to_none() {
        let json = r#"{"id":"1","category":"Dairy","name":"Milk","quantity":1,"expirationDate":"2030-05-01"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.image_url, None);
        assert!(!item.is_expired_on(date("2030-05-01")));
        assert!(item.is_expired_on(date("2030-05-02")));
    }

    #[test]
    fn test_item_quantity_is_read_leniently() {
        let parse = |quantity: &str| -> i64 {
            let json = format!(
                r#"{{"id":"1","category":"Dairy","name":"Milk","quantity":{quantity},"expirationDate":"2030-05-01"}}"#
            );
            serde_json::from_str::<Item>(&json).unwrap().quantity
        };

        assert_eq!(parse("3"), 3);
        assert_eq!(parse("null"), 0);
        assert_eq!(parse("-2"), -2);
        assert_eq!(parse("2.7"), 2);

        let missing = r#"{"id":"1","category":"Dairy","name":"Milk","expirationDate":"2030-05-01"}"#;
        assert_eq!(serde_json::from_str::<Item>(missing).unwrap().quantity, 0);
    }
}
