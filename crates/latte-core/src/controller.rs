//! # Cart Page Controller
//!
//! Owns the session's [`Cart`] together with the collaborators that show it.
//! The page's event handlers call these methods; nothing else touches the
//! cart.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  click "Add to cart"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  controller.add_entry(&entry)                                           │
//! │       ├── cart.add_item(name, price, image)                             │
//! │       ├── renderer.render(&CartView)      ← full redraw, never partial  │
//! │       ├── notifier.notify("Latte added to cart ✔")                      │
//! │       └── open the cart panel                                           │
//! │                                                                         │
//! │  click "Checkout"                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  controller.checkout(&mut storage)                                      │
//! │       ├── empty → toast "Your cart is empty." → CheckoutOutcome::Empty  │
//! │       └── else  → storage["demoCart"] = json  → Redirect(checkout.html) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating call re-renders, including calls that turn out to be no-ops,
//! so the panel can never show a stale cart.

use tracing::debug;

use crate::cart::{Cart, CartSnapshot};
use crate::catalog::CatalogEntry;
use crate::checkout::{self, CheckoutStorage, CHECKOUT_PAGE};
use crate::error::CoreError;
use crate::money::Money;
use crate::notify::{Notifier, Toast};
use crate::view::{CartRenderer, CartView};

/// Result of a checkout click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Cart was stored; navigate to this page.
    Redirect(&'static str),
    /// Cart was empty; user was told, nothing stored, stay on the page.
    Empty,
}

/// Session-scoped owner of the cart.
#[derive(Debug)]
pub struct CartController<R, N> {
    cart: Cart,
    renderer: R,
    notifier: N,
    panel_open: bool,
}

impl<R: CartRenderer, N: Notifier> CartController<R, N> {
    /// Starts a session with an empty cart and renders it once.
    pub fn new(renderer: R, notifier: N) -> Self {
        Self::with_cart(Cart::new(), renderer, notifier)
    }

    /// Starts a session from an existing cart (e.g. one restored on the
    /// checkout page).
    pub fn with_cart(cart: Cart, renderer: R, notifier: N) -> Self {
        let mut controller = CartController {
            cart,
            renderer,
            notifier,
            panel_open: false,
        };
        controller.render();
        controller
    }

    /// Adds one unit of a menu entry.
    pub fn add_entry(&mut self, entry: &CatalogEntry) {
        self.add_item(&entry.name, entry.unit_price(), entry.image_url.clone());
    }

    /// Adds one unit, re-renders, announces it and opens the panel.
    pub fn add_item(&mut self, name: &str, unit_price: Money, image_url: Option<String>) {
        let quantity = self.cart.add_item(name, unit_price, image_url);
        debug!(item = name, quantity, "cart add");

        self.render();
        self.notifier.notify(Toast::added(name));
        self.panel_open = true;
    }

    pub fn increment(&mut self, name: &str) -> bool {
        let changed = self.cart.increment(name);
        debug!(item = name, changed, "cart increment");
        self.render();
        changed
    }

    pub fn decrement(&mut self, name: &str) -> bool {
        let changed = self.cart.decrement(name);
        debug!(item = name, changed, "cart decrement");
        self.render();
        changed
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let changed = self.cart.remove(name);
        debug!(item = name, changed, "cart remove");
        self.render();
        changed
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        debug!("cart cleared");
        self.render();
    }

    /// Toasts a row's name and quantity. No state change.
    pub fn show_details(&mut self, name: &str) {
        if let Some(item) = self.cart.get(name) {
            self.notifier.notify(Toast::details(&item.name, item.quantity));
        }
    }

    /// Hands the cart to the checkout page.
    pub fn checkout<S: CheckoutStorage + ?Sized>(&mut self, storage: &mut S) -> CheckoutOutcome {
        match checkout::write_checkout(&self.cart, storage) {
            Ok(()) => {
                debug!(lines = self.cart.len(), "cart handed to checkout");
                CheckoutOutcome::Redirect(CHECKOUT_PAGE)
            }
            Err(err @ CoreError::CheckoutEmpty) => {
                self.notifier.notify(Toast::new(err.to_string()));
                CheckoutOutcome::Empty
            }
            Err(err) => {
                // Encoding plain strings and numbers does not fail in practice;
                // if it ever does, stay on the page.
                debug!(error = %err, "checkout encoding failed");
                self.notifier.notify(Toast::new("Checkout is unavailable right now."));
                CheckoutOutcome::Empty
            }
        }
    }

    // -------------------------------------------------------------------------
    // Cart panel
    // -------------------------------------------------------------------------

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Returns the new open state.
    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.panel_open
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn render(&mut self) {
        let view = CartView::from(&self.cart.snapshot());
        self.renderer.render(&view);
    }
}
