//! # Validation Module
//!
//! Input validation for everything the server accepts: contact messages and
//! ledger orders.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page script                                                   │
//! │  └── required attributes on the contact form                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use latte_core::validation::{validate_email, validate_quantity};
//!
//! validate_email("ada@example.com").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::checkout::CheckoutLine;
use crate::error::ValidationError;
use crate::types::{NewContactMessage, NewOrder, OrderUpdate};
use crate::{
    MAX_CONTACT_MESSAGE_LEN, MAX_CONTACT_NAME_LEN, MAX_EMAIL_LEN, MAX_ITEM_NAME_LEN,
    MAX_LINE_QUANTITY, MAX_NOTES_LEN, MAX_ORDER_LINES,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Trimmed, non-empty, at most `max` characters.
fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a menu item name on an order line.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use latte_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Latte").is_ok());
/// assert!(validate_item_name("").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    required_text("name", name, MAX_ITEM_NAME_LEN)
}

/// Validates the sender name on the contact form (1-100 characters).
pub fn validate_contact_name(name: &str) -> ValidationResult<()> {
    required_text("name", name, MAX_CONTACT_NAME_LEN)
}

/// Validates the contact message body (1-5000 characters).
pub fn validate_message(message: &str) -> ValidationResult<()> {
    required_text("message", message, MAX_CONTACT_MESSAGE_LEN)
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty, at most 254 characters
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
///
/// This is a shape check, not deliverability.
///
/// ## Example
/// ```rust
/// use latte_core::validation::validate_email;
///
/// assert!(validate_email("ada@example.com").is_ok());
/// assert!(validate_email("ada@localhost").is_err());
/// assert!(validate_email("not an email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required_text("email", email, MAX_EMAIL_LEN)?;
    let email = email.trim();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be of the form name@domain"));
    }

    let dot = domain.rfind('.').ok_or_else(|| invalid("domain must contain a dot"))?;
    if domain.starts_with('.') || dot == domain.len() - 1 {
        return Err(invalid("domain is malformed"));
    }

    Ok(())
}

/// Validates optional order notes. Absent notes are fine.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<()> {
    match notes {
        Some(notes) if notes.chars().count() > MAX_NOTES_LEN => Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity on a server-side order line.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// The in-page cart has no upper bound; this limit only applies once an
/// order reaches the ledger.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary items)
///
/// ## Example
/// ```rust
/// use latte_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(450).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of lines on one order (1-100).
pub fn validate_order_lines(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if count > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_LINES as i64,
        });
    }

    Ok(())
}

/// Validates one checkout line as forwarded to the ledger.
pub fn validate_checkout_line(line: &CheckoutLine) -> ValidationResult<()> {
    validate_item_name(&line.name)?;
    validate_price_cents(line.unit_price.cents())?;
    validate_quantity(i64::from(line.quantity))
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates a contact form submission.
pub fn validate_contact(input: &NewContactMessage) -> ValidationResult<()> {
    validate_contact_name(&input.name)?;
    validate_email(&input.email)?;
    validate_message(&input.message)
}

/// Validates an order before it is written to the ledger.
///
/// ## Order of Checks
/// ```text
/// customer name ──► email (if given) ──► notes ──► line count ──► each line
/// ```
/// The first failing rule is reported.
pub fn validate_new_order(order: &NewOrder) -> ValidationResult<()> {
    validate_contact_name(&order.customer_name)?;

    if let Some(email) = order.customer_email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email)?;
    }

    validate_notes(order.notes.as_deref())?;
    validate_order_lines(order.items.len())?;

    order.items.iter().try_for_each(validate_checkout_line)
}

/// Validates a partial order update.
pub fn validate_order_update(update: &OrderUpdate) -> ValidationResult<()> {
    if let Some(name) = update.customer_name.as_deref() {
        validate_contact_name(name)?;
    }

    validate_notes(update.notes.as_deref())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use latte_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn line(name: &str, cents: i64, quantity: u32) -> CheckoutLine {
        CheckoutLine {
            name: name.to_string(),
            unit_price: Money::from_cents(cents),
            quantity,
            image_url: None,
        }
    }

    fn order(items: Vec<CheckoutLine>) -> NewOrder {
        NewOrder {
            customer_name: "Ada".to_string(),
            customer_email: None,
            notes: None,
            items,
        }
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Latte").is_ok());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email(" ada@louvre.latte.fr ").is_ok());

        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada@example.").is_err());
        assert!(validate_email("ada@.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("ada lovelace@example.com").is_err());
    }

    #[test]
    fn test_validate_contact() {
        let ok = NewContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Table for two?".to_string(),
        };
        assert!(validate_contact(&ok).is_ok());

        let long = NewContactMessage {
            message: "x".repeat(5001),
            ..ok.clone()
        };
        assert!(matches!(
            validate_contact(&long),
            Err(ValidationError::TooLong { max: 5000, .. })
        ));

        let unnamed = NewContactMessage {
            name: String::new(),
            ..ok
        };
        assert!(validate_contact(&unnamed).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(450).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_new_order() {
        assert!(validate_new_order(&order(vec![line("Latte", 450, 2)])).is_ok());

        assert!(matches!(
            validate_new_order(&order(vec![])),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_new_order(&order(vec![line("Latte", 450, 0)])).is_err());
        assert!(validate_new_order(&order(vec![line("", 450, 1)])).is_err());

        let too_many: Vec<_> = (0..101).map(|i| line(&format!("Item {i}"), 100, 1)).collect();
        assert!(validate_new_order(&order(too_many)).is_err());

        let mut bad_email = order(vec![line("Latte", 450, 1)]);
        bad_email.customer_email = Some("nope".to_string());
        assert!(validate_new_order(&bad_email).is_err());

        let mut blank_email = order(vec![line("Latte", 450, 1)]);
        blank_email.customer_email = Some(String::new());
        assert!(validate_new_order(&blank_email).is_ok());
    }

    #[test]
    fn test_validate_order_update() {
        assert!(validate_order_update(&OrderUpdate::default()).is_ok());

        let update = OrderUpdate {
            customer_name: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_order_update(&update).is_err());

        let update = OrderUpdate {
            notes: Some("n".repeat(1001)),
            ..Default::default()
        };
        assert!(validate_order_update(&update).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
