//! # latte-core: Cart Engine for Louvre & Latte
//!
//! This crate holds the site's business logic as pure code with zero I/O:
//! the shopping cart, price handling, the checkout handoff, and the types
//! the server stores.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Louvre & Latte Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront page                              │   │
//! │  │    Menu ──► Add to cart ──► Cart panel ──► Checkout            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartRenderer / Notifier /              │
//! │                                │ CheckoutStorage                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ latte-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │ Cart      │  │  Money    │  │ demoCart  │  │   rules   │  │   │
//! │  │   │ LineItem  │  │  parsing  │  │ transfer  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO DOM                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            latte-db (Database Layer) + latte-server             │   │
//! │  │        contact messages, order ledger, HTTP routes              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart and LineItem, the mutation rules
//! - [`controller`] - Session owner of the cart; re-renders after every call
//! - [`view`] - Cart to CartView projection
//! - [`notify`] - Toast messages
//! - [`checkout`] - Transfer JSON and the storage collaborator
//! - [`catalog`] - Menu entries, price resolution, category filter
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Contact messages and the order ledger
//! - [`validation`] - Input rules for the server
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use latte_core::{Cart, Money};
//!
//! let mut cart = Cart::new();
//! cart.add_item("Latte", Money::from_cents(450), None);
//! cart.add_item("Latte", Money::from_cents(450), None);
//! cart.add_item("Croissant", Money::from_cents(300), None);
//!
//! assert_eq!(cart.total().to_string(), "$12.00");
//! assert_eq!(cart.badge_count(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod controller;
pub mod error;
pub mod money;
pub mod notify;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSnapshot, LineItem};
pub use catalog::{Catalog, CatalogEntry, CategoryFilter};
pub use checkout::{CheckoutLine, CheckoutStorage, MemoryStorage, CHECKOUT_PAGE, CHECKOUT_STORAGE_KEY};
pub use controller::{CartController, CheckoutOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use notify::{Notifier, Toast, ToastLog, TOAST_TTL};
pub use types::*;
pub use view::{CartRenderer, CartRow, CartView, LastView};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines on a single ledger order.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of one line on a ledger order.
///
/// ## Business Reason
/// Catches typos like 1000 instead of 10 before they reach the kitchen.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum length of a menu item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Maximum length of the contact form's name field.
pub const MAX_CONTACT_NAME_LEN: usize = 100;

/// Maximum length of an email address.
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of a contact message body.
pub const MAX_CONTACT_MESSAGE_LEN: usize = 5000;

/// Maximum length of order notes.
pub const MAX_NOTES_LEN: usize = 1000;
