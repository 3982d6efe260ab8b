//! # Cart Engine
//!
//! The in-browser shopping cart: an ordered list of line items plus the
//! totals derived from it.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Page Action              Engine Call              Cart State Change    │
//! │  ───────────              ───────────              ─────────────────    │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_item() ────────────► push or qty += 1    │
//! │                                                                         │
//! │  "+" on a row ──────────► increment() ───────────► qty += 1            │
//! │                                                                         │
//! │  "-" on a row ──────────► decrement() ───────────► qty -= 1 or remove  │
//! │                                                                         │
//! │  "Clear" ───────────────► clear() ───────────────► items.clear()       │
//! │                                                                         │
//! │  Render / checkout ─────► snapshot() ────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per `name` (the name is the identity of an item).
//! - Every line has `quantity >= 1`; a line never sits at zero, it is removed.
//! - `items` keeps first-added-first order, which is the display order.
//!
//! Operations on a name that is not in the cart are no-ops that return
//! `false`. The page never offers controls for such names, but stale clicks
//! must not corrupt anything.

use serde::{Deserialize, Serialize};

use crate::checkout::{self, CheckoutLine};
use crate::error::CoreResult;
use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product display name, also the cart key.
    pub name: String,

    /// Price of one unit, frozen when the item was first added.
    pub unit_price: Money,

    /// Always >= 1.
    pub quantity: u32,

    /// Thumbnail shown in the cart panel.
    pub image_url: Option<String>,
}

impl LineItem {
    /// Line subtotal (unit price × quantity).
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only view of the cart at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub total: Money,
    pub badge_count: u64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Owned by the page controller for the lifetime of one page session.
/// There is no global instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Name already in cart: quantity + 1 (price and image stay as first added)
    /// - Otherwise: appended with quantity 1, price clamped into
    ///   `0..=Money::MAX_UNIT_PRICE`
    ///
    /// Always succeeds. Returns the resulting quantity of that line.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        image_url: Option<String>,
    ) -> u32 {
        let name = name.into();

        if let Some(item) = self.find_mut(&name) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(LineItem {
            name,
            unit_price: unit_price.clamp_unit_price(),
            quantity: 1,
            image_url,
        });
        1
    }

    /// Adds one unit to an existing line. Returns `false` if `name` is absent.
    pub fn increment(&mut self, name: &str) -> bool {
        match self.find_mut(name) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Removes one unit; the line is dropped when its last unit goes.
    ///
    /// Returns `false` if `name` is absent.
    pub fn decrement(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };

        if self.items[index].quantity > 1 {
            self.items[index].quantity -= 1;
        } else {
            self.items.remove(index);
        }
        true
    }

    /// Removes a line regardless of its quantity. Returns `false` if absent.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Total unit count across all lines (the header badge).
    pub fn badge_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Copies the current state for rendering or handoff.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
            badge_count: self.badge_count(),
        }
    }

    /// Encodes the cart as checkout transfer JSON.
    ///
    /// ## Errors
    /// [`CoreError::CheckoutEmpty`](crate::CoreError::CheckoutEmpty) when the
    /// cart has no items. Nothing is mutated either way.
    pub fn serialize_for_checkout(&self) -> CoreResult<String> {
        checkout::encode_checkout(&self.items)
    }

    /// Rebuilds a cart from transfer lines (the checkout page's view).
    ///
    /// Lines with the same name are merged and zero quantities skipped, so
    /// the result always satisfies the cart invariants.
    pub fn from_checkout_lines(lines: impl IntoIterator<Item = CheckoutLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.find_mut(&line.name) {
                Some(item) => item.quantity = item.quantity.saturating_add(line.quantity),
                None => cart.items.push(LineItem::from(line)),
            }
        }
        cart
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.name == name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
