//! # Repository Module
//!
//! Database repositories for Louvre & Latte.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  state.db.orders().list(Some(OrderStatus::Pending), 20)         │
//! │       ▼                                                                 │
//! │  OrderRepository                                                        │
//! │  ├── create(&self, new_order)                                           │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── list(&self, status, limit)                                         │
//! │  ├── update(&self, id, update)                                          │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories hold a pool clone and are created per call
//! (`db.orders()`), so they are never stored.
//!
//! ## Available Repositories
//!
//! - [`ContactRepository`](contact::ContactRepository) - Contact form messages
//! - [`OrderRepository`](order::OrderRepository) - Order ledger

pub mod contact;
pub mod order;

/// Default page size for list queries.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Largest page size a list query will return.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Clamps a requested page size into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_LIST_LIMIT
    } else {
        limit.min(MAX_LIST_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_limit(-5), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(10_000), MAX_LIST_LIMIT);
    }
}
