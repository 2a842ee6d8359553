//! Shopping item model and the add-form draft

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned when the caller does not pick one
pub const DEFAULT_CATEGORY: &str = "Grocery";

/// Opaque, immutable identifier of a shopping item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single entry of the shopping list
///
/// Serialized with the field names `id`, `name`, `quantity`, `purchased`,
/// `category` and `dateAdded`.
///
/// Reading is forgiving so lists written by older clients still load:
/// `quantity` takes any number or numeric string and is coerced like
/// [`normalize_quantity`], a missing `purchased` is `false`, a missing
/// `category` is [`DEFAULT_CATEGORY`], and a missing or unreadable
/// `dateAdded` becomes the time of loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: ItemId,
    pub name: String,
    #[serde(
        default = "lenient::default_quantity",
        deserialize_with = "lenient::quantity"
    )]
    pub quantity: u32,
    #[serde(default)]
    pub purchased: bool,
    #[serde(default = "lenient::default_category")]
    pub category: String,
    #[serde(default = "Utc::now", deserialize_with = "lenient::date_added")]
    pub date_added: DateTime<Utc>,
}

// Serde helpers for reading stored items
mod lenient {
    use super::{DEFAULT_CATEGORY, normalize_quantity, parse_quantity};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn default_quantity() -> u32 {
        1
    }

    pub fn default_category() -> String {
        DEFAULT_CATEGORY.to_string()
    }

    pub fn quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|_| i64::MAX))
                .or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => parse_quantity(&s),
            _ => None,
        };
        Ok(normalize_quantity(raw.unwrap_or(1)))
    }

    pub fn date_added<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Value::deserialize(deserializer)? {
            Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            _ => None,
        };
        Ok(parsed.unwrap_or_else(Utc::now))
    }
}

/// Where an item sits in its lifecycle while it is still in the list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemState {
    Active,
    Purchased,
}

impl ShoppingItem {
    pub fn state(&self) -> ItemState {
        if self.purchased {
            ItemState::Purchased
        } else {
            ItemState::Active
        }
    }
}

/// Everything the caller supplies when adding an item
///
/// The quantity is kept raw so the store can coerce bad input instead of
/// rejecting it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: i64,
    pub category: String,
    /// `None` stamps the item with the time of the add
    pub date_added: Option<DateTime<Utc>>,
}

impl ItemDraft {
    /// Create a draft in the default category
    ///
    /// # Example
    ///
    /// ```
    /// use shopping_list::ItemDraft;
    ///
    /// let draft = ItemDraft::new("Milk", 2).with_category("Dairy");
    /// assert_eq!(draft.category, "Dairy");
    /// ```
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            category: DEFAULT_CATEGORY.to_string(),
            date_added: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn added_at(mut self, date_added: DateTime<Utc>) -> Self {
        self.date_added = Some(date_added);
        self
    }

    /// Build a draft from raw form text
    ///
    /// Quantity text that does not start with an integer becomes `1`.
    pub fn from_form(name: &str, quantity: &str, category: &str) -> Self {
        Self::new(name, parse_quantity(quantity).unwrap_or(1)).with_category(category)
    }
}

/// Read the leading integer of a free-text quantity field
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. Returns `None` when no digits are found.
pub fn parse_quantity(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Coerce a raw quantity into the valid range, non-positive becomes `1`
pub fn normalize_quantity(raw: i64) -> u32 {
    if raw < 1 {
        1
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}

/// Trimmed name, or `None` if nothing is left after trimming
pub fn normalize_name(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity("  12 packs"), Some(12));
        assert_eq!(parse_quantity("-5"), Some(-5));
        assert_eq!(parse_quantity("+7"), Some(7));
        assert_eq!(parse_quantity("abc"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("-"), None);
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(-5), 1);
        assert_eq!(normalize_quantity(0), 1);
        assert_eq!(normalize_quantity(4), 4);
        assert_eq!(normalize_quantity(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Milk "), Some("Milk"));
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name(""), None);
    }

    #[test]
    fn test_draft_from_form() {
        let draft = ItemDraft::from_form("Eggs", "twelve", "Dairy");
        assert_eq!(draft.quantity, 1);
        assert_eq!(draft.category, "Dairy");
        assert!(draft.date_added.is_none());

        let draft = ItemDraft::from_form("Eggs", "12", "Dairy");
        assert_eq!(draft.quantity, 12);
    }

    #[test]
    fn test_item_reads_loose_quantities() {
        let read = |quantity: &str| {
            let json = format!(
                r#"{{"id":"a","name":"Milk","quantity":{},"purchased":false,"category":"Dairy","dateAdded":"2024-03-01T09:30:00Z"}}"#,
                quantity
            );
            serde_json::from_str::<ShoppingItem>(&json).unwrap().quantity
        };

        assert_eq!(read("-5"), 1);
        assert_eq!(read("0"), 1);
        assert_eq!(read("2.5"), 2);
        assert_eq!(read("\"4\""), 4);
        assert_eq!(read("null"), 1);
        assert_eq!(read("18446744073709551615"), u32::MAX);
        assert_eq!(read("3"), 3);
    }

    #[test]
    fn test_item_fills_missing_fields() {
        let before = Utc::now();
        let item: ShoppingItem = serde_json::from_str(r#"{"id":"a","name":"Milk"}"#).unwrap();

        assert_eq!(item.quantity, 1);
        assert!(!item.purchased);
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert!(item.date_added >= before);

        let item: ShoppingItem =
            serde_json::from_str(r#"{"id":"a","name":"Milk","dateAdded":"yesterday"}"#).unwrap();
        assert!(item.date_added >= before);
    }

    #[test]
    fn test_item_json_field_names() {
        let item = ShoppingItem {
            id: ItemId::new("a1"),
            name: "Bread".to_string(),
            quantity: 2,
            purchased: true,
            category: "Bakery".to_string(),
            date_added: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&item).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["category", "dateAdded", "id", "name", "purchased", "quantity"]
        );
        assert_eq!(object["id"], "a1");
        assert_eq!(item.state(), ItemState::Purchased);
    }
}
