//! # Error Types
//!
//! Domain-specific error types for latte-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  latte-core errors (this file)                                          │
//! │  ├── CoreError        - Cart / checkout failures                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  latte-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  server errors (apps/server)                                            │
//! │  └── ApiError         - What HTTP clients see                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations themselves have no error path: a missing item name is a
//! no-op. The only cart failure a user can hit is checking out an empty cart.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted on an empty cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Checkout" (cart empty)
    ///      │
    ///      ▼
    /// serialize_for_checkout() → CheckoutEmpty
    ///      │
    ///      ▼
    /// Toast "Your cart is empty." (no storage write, no navigation)
    /// ```
    #[error("Your cart is empty.")]
    CheckoutEmpty,

    /// The checkout transfer JSON could not be encoded or decoded.
    #[error("Invalid checkout data: {0}")]
    Transfer(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for contact messages and ledger orders.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set (e.g. an unknown order status).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;
