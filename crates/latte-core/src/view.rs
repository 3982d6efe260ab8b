//! # Cart View Projection
//!
//! Turns a [`CartSnapshot`] into exactly what the cart panel displays. The
//! engine never touches the DOM; a [`CartRenderer`] receives a complete
//! [`CartView`] after every mutation and redraws from scratch.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  🛒 3                                        │ ← badge_count
//! ├──────────────────────────────────────────────┤
//! │  [img] Latte        -  2  +        $9.00     │ ← rows (items order)
//! │  [img] Croissant    -  1  +        $3.00     │
//! ├──────────────────────────────────────────────┤
//! │  Total: $12.00                               │ ← total_label
//! └──────────────────────────────────────────────┘
//!   (or "Your cart is empty" when is_empty)
//! ```

use serde::Serialize;

use crate::cart::CartSnapshot;
use crate::money::Money;

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
    pub name: String,
    pub quantity: u32,
    pub image_url: Option<String>,
    /// Formatted line subtotal, e.g. `$9.00`.
    pub subtotal_label: String,
}

/// Everything the cart panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub total: Money,
    /// `Total: $12.00`
    pub total_label: String,
    pub badge_count: u64,
    /// Show the empty indicator instead of rows.
    pub is_empty: bool,
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        let rows = snapshot
            .items
            .iter()
            .map(|item| CartRow {
                name: item.name.clone(),
                quantity: item.quantity,
                image_url: item.image_url.clone(),
                subtotal_label: item.subtotal().to_string(),
            })
            .collect();

        CartView {
            rows,
            total: snapshot.total,
            total_label: format!("Total: {}", snapshot.total),
            badge_count: snapshot.badge_count,
            is_empty: snapshot.is_empty(),
        }
    }
}

/// Consumer of cart views (the DOM layer in the browser).
pub trait CartRenderer {
    fn render(&mut self, view: &CartView);
}

/// Renderer that remembers the last view and how many renders happened.
#[derive(Debug, Clone, Default)]
pub struct LastView {
    pub view: Option<CartView>,
    pub renders: usize,
}

impl CartRenderer for LastView {
    fn render(&mut self, view: &CartView) {
        self.view = Some(view.clone());
        self.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;

    #[test]
    fn test_projection_of_filled_cart() {
        let mut cart = Cart::new();
        cart.add_item("Latte", Money::from_cents(450), Some("latte.jpg".into()));
        cart.add_item("Latte", Money::from_cents(450), Some("latte.jpg".into()));
        cart.add_item("Croissant", Money::from_cents(300), None);

        let view = CartView::from(&cart.snapshot());

        assert!(!view.is_empty);
        assert_eq!(view.badge_count, 3);
        assert_eq!(view.total_label, "Total: $12.00");
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].name, "Latte");
        assert_eq!(view.rows[0].subtotal_label, "$9.00");
        assert_eq!(view.rows[1].subtotal_label, "$3.00");
    }

    #[test]
    fn test_projection_of_empty_cart() {
        let view = CartView::from(&Cart::new().snapshot());

        assert!(view.is_empty);
        assert!(view.rows.is_empty());
        assert_eq!(view.total_label, "Total: $0.00");
        assert_eq!(view.badge_count, 0);
    }
}
