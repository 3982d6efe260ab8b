//! # Checkout Handoff
//!
//! The cart does not survive navigation. Before the page redirects to the
//! checkout view it writes the cart into per-session storage as JSON, and the
//! checkout view reads it back.
//!
//! ## Transfer Format
//! ```text
//! localStorage["demoCart"] = [
//!   { "name": "Latte",     "unitPrice": 4.5, "quantity": 2, "imageUrl": "img/latte.jpg" },
//!   { "name": "Croissant", "unitPrice": 3,   "quantity": 1, "imageUrl": null }
//! ]
//! ```
//!
//! The same line shape is what the server's `POST /api/orders` accepts, so a
//! checkout page can forward the stored cart unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::{Cart, LineItem};
use crate::error::{CoreError, CoreResult};
use crate::money::{self, Money};

/// Storage key the cart is written under.
pub const CHECKOUT_STORAGE_KEY: &str = "demoCart";

/// Page the browser navigates to after a successful handoff.
pub const CHECKOUT_PAGE: &str = "checkout.html";

// =============================================================================
// Transfer Line
// =============================================================================

/// One line of the checkout transfer representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutLine {
    pub name: String,

    /// Unit price as a major-unit number (`4.5` for $4.50).
    #[serde(with = "money::major_units")]
    #[ts(type = "number")]
    pub unit_price: Money,

    pub quantity: u32,

    pub image_url: Option<String>,
}

impl CheckoutLine {
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

impl From<&LineItem> for CheckoutLine {
    fn from(item: &LineItem) -> Self {
        CheckoutLine {
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            image_url: item.image_url.clone(),
        }
    }
}

impl From<CheckoutLine> for LineItem {
    fn from(line: CheckoutLine) -> Self {
        LineItem {
            name: line.name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            image_url: line.image_url,
        }
    }
}

// =============================================================================
// Storage Collaborator
// =============================================================================

/// Per-session key/value storage (the browser's `localStorage`).
pub trait CheckoutStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String);
}

/// In-memory storage, for tests and for hosts without a browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CheckoutStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes cart lines as transfer JSON.
///
/// ## Errors
/// - [`CoreError::CheckoutEmpty`] if `items` is empty
pub fn encode_checkout(items: &[LineItem]) -> CoreResult<String> {
    if items.is_empty() {
        return Err(CoreError::CheckoutEmpty);
    }
    let lines: Vec<CheckoutLine> = items.iter().map(CheckoutLine::from).collect();
    Ok(serde_json::to_string(&lines)?)
}

/// Strictly decodes transfer JSON. Any malformed line fails the whole decode.
pub fn decode_checkout(text: &str) -> CoreResult<Vec<CheckoutLine>> {
    Ok(serde_json::from_str(text)?)
}

/// Tolerant decode for the checkout view.
///
/// Missing or malformed JSON yields an empty list; individual malformed lines
/// and lines with quantity 0 are skipped.
pub fn restore_lines(text: Option<&str>) -> Vec<CheckoutLine> {
    let Some(text) = text else {
        return Vec::new();
    };

    let raw: Vec<serde_json::Value> = match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(error = %err, "Ignoring malformed checkout data");
            return Vec::new();
        }
    };

    raw.into_iter()
        .filter_map(|value| serde_json::from_value::<CheckoutLine>(value).ok())
        .filter(|line| line.quantity > 0)
        .collect()
}

/// Sum of unit price × quantity over transfer lines.
pub fn checkout_total(lines: &[CheckoutLine]) -> Money {
    lines.iter().map(CheckoutLine::subtotal).sum()
}

/// Writes the cart to storage under [`CHECKOUT_STORAGE_KEY`].
///
/// Storage is left untouched when the cart is empty.
pub fn write_checkout<S: CheckoutStorage + ?Sized>(cart: &Cart, storage: &mut S) -> CoreResult<()> {
    let json = cart.serialize_for_checkout()?;
    storage.set_item(CHECKOUT_STORAGE_KEY, json);
    Ok(())
}

/// Reads the stored cart back, tolerating missing or malformed data.
pub fn read_checkout<S: CheckoutStorage + ?Sized>(storage: &S) -> Cart {
    let stored = storage.get_item(CHECKOUT_STORAGE_KEY);
    Cart::from_checkout_lines(restore_lines(stored.as_deref()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item("Latte", Money::from_cents(450), Some("img/latte.jpg".into()));
        cart.add_item("Latte", Money::from_cents(450), Some("img/latte.jpg".into()));
        cart.add_item("Croissant", Money::from_cents(300), None);
        cart
    }

    #[test]
    fn test_transfer_shape() {
        let json = sample_cart().serialize_for_checkout().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!([
                { "name": "Latte", "unitPrice": 4.5, "quantity": 2, "imageUrl": "img/latte.jpg" },
                { "name": "Croissant", "unitPrice": 3.0, "quantity": 1, "imageUrl": null }
            ])
        );
    }

    #[test]
    fn test_write_checkout_stores_under_key() {
        let mut storage = MemoryStorage::new();
        write_checkout(&sample_cart(), &mut storage).unwrap();

        let stored = storage.get_item(CHECKOUT_STORAGE_KEY).unwrap();
        let lines = decode_checkout(&stored).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(checkout_total(&lines), Money::from_cents(1200));
    }

    #[test]
    fn test_write_checkout_empty_leaves_storage_untouched() {
        let mut storage = MemoryStorage::new();
        let result = write_checkout(&Cart::new(), &mut storage);

        assert!(matches!(result, Err(CoreError::CheckoutEmpty)));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_read_checkout_roundtrip() {
        let mut storage = MemoryStorage::new();
        let cart = sample_cart();
        write_checkout(&cart, &mut storage).unwrap();

        assert_eq!(read_checkout(&storage), cart);
    }

    #[test]
    fn test_decode_strict_rejects_bad_lines() {
        assert!(decode_checkout("not json").is_err());
        assert!(decode_checkout(r#"[{"name":"Latte","unitPrice":-1,"quantity":1}]"#).is_err());
    }

    #[test]
    fn test_restore_lines_ignores_malformed_state() {
        assert!(restore_lines(None).is_empty());
        assert!(restore_lines(Some("{oops")).is_empty());
        assert!(restore_lines(Some(r#"{"name":"Latte"}"#)).is_empty());

        let lines = restore_lines(Some(
            r#"[
                {"name":"Latte","unitPrice":4.5,"quantity":1},
                {"name":"Broken","unitPrice":"free","quantity":1},
                {"name":"Zero","unitPrice":1,"quantity":0},
                {"name":"Tart","unitPrice":5.25,"quantity":2,"imageUrl":null}
            ]"#,
        ));
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Latte", "Tart"]);
        assert_eq!(lines[0].image_url, None);
    }
}
