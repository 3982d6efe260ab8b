//! # Ledger Types
//!
//! Server-side records: contact-form messages and the order ledger.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ContactMessage  │   │      Order      │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  order_id (FK)  │       │
//! │  │  name, email    │   │  customer_name  │   │  name snapshot  │       │
//! │  │  message        │   │  status         │   │  unit_price     │       │
//! │  └─────────────────┘   │  total_cents    │   │  quantity       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  OrderStatus: pending → preparing → completed                          │
//! │                   └───────────┴──────► cancelled                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order items use the snapshot pattern: name and price are copied from the
//! checkout transfer line, so later menu changes never rewrite history.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::checkout::CheckoutLine;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Contact Messages
// =============================================================================

/// A submitted contact form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Contact form fields as posted by the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

// =============================================================================
// Order Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum OrderStatus {
    /// Received, not yet started.
    Pending,
    /// Being made.
    Preparing,
    /// Handed over.
    Completed,
    /// Dropped before completion.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Cancelled orders do not count towards revenue.
    pub const fn counts_as_revenue(&self) -> bool {
        !matches!(self, OrderStatus::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Orders
// =============================================================================

/// An order in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    /// Σ line totals in cents, computed server-side.
    pub total_cents: i64,
    /// Σ quantities.
    pub item_count: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line of an order (frozen copy of a checkout line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
    pub image_url: Option<String>,
}

/// Order plus its lines, as returned by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Body of `POST /api/orders`: the checkout page forwards the stored cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewOrder {
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<CheckoutLine>,
}

/// Body of `PUT /api/orders/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.customer_name.is_none() && self.notes.is_none()
    }
}

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub order_count: i64,
    pub pending_count: i64,
    /// Σ totals of non-cancelled orders.
    pub revenue_cents: i64,
    pub contact_count: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!(" Completed ".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");

        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_status_default_and_revenue() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert!(OrderStatus::Completed.counts_as_revenue());
        assert!(!OrderStatus::Cancelled.counts_as_revenue());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, r#""preparing""#);
    }

    #[test]
    fn test_new_order_accepts_checkout_lines() {
        let body = r#"{
            "customerName": "Ada",
            "items": [{"name":"Latte","unitPrice":4.5,"quantity":2,"imageUrl":null}]
        }"#;
        let order: NewOrder = serde_json::from_str(body).unwrap();

        assert_eq!(order.customer_email, None);
        assert_eq!(order.items[0].unit_price, Money::from_cents(450));
    }

    #[test]
    fn test_order_update_is_empty() {
        assert!(OrderUpdate::default().is_empty());
        let update: OrderUpdate = serde_json::from_str(r#"{"status":"completed"}"#).unwrap();
        assert!(!update.is_empty());
    }
}
