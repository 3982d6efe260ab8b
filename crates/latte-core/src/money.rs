//! # Money Module
//!
//! Provides the `Money` type for prices, line subtotals and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A cart summed in floats:                                               │
//! │    0.10 + 0.20 = 0.30000000000000004                                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Latte 450¢ × 2 + Croissant 300¢ = 1200¢ → "$12.00"                   │
//! │                                                                         │
//! │  Floats only appear at the JSON edge (the checkout transfer format      │
//! │  carries `unitPrice` as a number) and are rounded back to cents.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Parsing
//! Catalog prices arrive as text. Two parsers exist:
//! - [`Money::parse_price_attr`] for a machine-readable attribute (`"4.50"`),
//!   strict, returns `None` when the value is not a plain decimal.
//! - [`Money::parse_display_price`] for display text (`"$4.50"`), lenient,
//!   keeps only digits and dots and degrades to zero on garbage.
//!
//! ## Usage
//! ```rust
//! use latte_core::money::Money;
//!
//! let latte = Money::from_cents(450);
//! assert_eq!((latte * 2).to_string(), "$9.00");
//! assert_eq!(Money::parse_display_price("$4.50"), latte);
//! assert_eq!(Money::parse_display_price("market price"), Money::zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that differences (and future refunds) stay representable; cart
/// prices themselves are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use latte_core::money::Money;
    ///
    /// let price = Money::from_cents(450); // $4.50
    /// assert_eq!(price.cents(), 450);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Highest unit price the cart accepts: $10 trillion.
    ///
    /// Every cent amount up to this value survives the checkout transfer's
    /// major-unit `f64` exactly; larger amounts would not.
    pub const MAX_UNIT_PRICE: Money = Money(1_000_000_000_000_000);

    /// Converts a major-unit float (as found in JSON) to cents, rounding to
    /// the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    ///
    /// ```rust
    /// use latte_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(4.5), Some(Money::from_cents(450)));
    /// assert_eq!(Money::from_major_f64(12.99), Some(Money::from_cents(1299)));
    /// assert_eq!(Money::from_major_f64(f64::NAN), None);
    /// ```
    pub fn from_major_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in major units as a float.
    ///
    /// Only for the JSON transfer edge; never compute with the result.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating instead of
    /// overflowing.
    ///
    /// ```rust
    /// use latte_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(450).multiply_quantity(2);
    /// assert_eq!(subtotal.cents(), 900);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Parses a machine-readable price attribute such as `"4.50"`.
    ///
    /// Surrounding whitespace is ignored. Anything other than a plain,
    /// non-negative decimal no greater than [`Money::MAX_UNIT_PRICE`] returns
    /// `None` so the caller can fall back to the display text.
    ///
    /// ```rust
    /// use latte_core::money::Money;
    ///
    /// assert_eq!(Money::parse_price_attr(" 4.5 "), Some(Money::from_cents(450)));
    /// assert_eq!(Money::parse_price_attr("$4.50"), None);
    /// assert_eq!(Money::parse_price_attr(""), None);
    /// assert_eq!(Money::parse_price_attr("90071992547409.93"), None);
    /// ```
    pub fn parse_price_attr(attr: &str) -> Option<Self> {
        parse_unit_price(attr.trim())
    }

    /// Parses a displayed price such as `"$4.50"` or `"4.50 USD"`.
    ///
    /// ## Rules
    /// ```text
    /// "$4.50"        → keep [0-9.] → "4.50"   → 450¢
    /// "4.50 USD"     → "4.50"                 → 450¢
    /// "1.2.3"        → leading decimal "1.2"  → 120¢
    /// "Ask the barista" → ""                  → 0¢
    /// above MAX_UNIT_PRICE                    → 0¢
    /// ```
    ///
    /// Never fails: a broken price must not block the rest of the page.
    pub fn parse_display_price(text: &str) -> Self {
        let kept: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        parse_unit_price(leading_decimal(&kept)).unwrap_or_default()
    }

    /// Clamps into the unit price range `0..=MAX_UNIT_PRICE`.
    ///
    /// ```rust
    /// use latte_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-100).clamp_unit_price(), Money::zero());
    /// assert_eq!(Money::from_cents(i64::MAX).clamp_unit_price(), Money::MAX_UNIT_PRICE);
    /// ```
    pub fn clamp_unit_price(self) -> Self {
        Money(self.0.clamp(0, Self::MAX_UNIT_PRICE.0))
    }
}

/// Returns the longest prefix of `s` shaped like `digits [ '.' digits ]`.
fn leading_decimal(s: &str) -> &str {
    let mut seen_dot = false;
    let end = s
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' {
                if seen_dot {
                    return true;
                }
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..end]
}

fn parse_unit_price(s: &str) -> Option<Money> {
    parse_decimal(s).filter(|money| *money <= Money::MAX_UNIT_PRICE)
}

/// Strict decimal parser: `digits [ '.' digits ]`, at least one digit.
///
/// Fractions beyond cents are rounded half-up on the third digit.
fn parse_decimal(s: &str) -> Option<Money> {
    let (whole, frac) = match s.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut cents: i64 = 0;
    for digit in whole.bytes() {
        cents = cents.checked_mul(10)?.checked_add(i64::from(digit - b'0'))?;
    }
    cents = cents.checked_mul(100)?;

    let mut frac_digits = frac.bytes().map(|b| i64::from(b - b'0'));
    let tenths = frac_digits.next().unwrap_or(0);
    let hundredths = frac_digits.next().unwrap_or(0);
    let round_up = frac_digits.next().is_some_and(|d| d >= 5);

    cents = cents.checked_add(tenths * 10 + hundredths)?;
    if round_up {
        cents = cents.checked_add(1)?;
    }

    Some(Money(cents))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays as `$12.00` (or `-$5.50`), the format the cart panel shows.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Transfer Format Helpers
// =============================================================================

/// Serde adapter writing `Money` as a major-unit JSON number (`4.5`).
///
/// Used with `#[serde(with = "crate::money::major_units")]` on the checkout
/// transfer line, whose `unitPrice` field is a plain number.
pub mod major_units {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_major_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        match Money::from_major_f64(value) {
            Some(money) if !money.is_negative() && money <= Money::MAX_UNIT_PRICE => Ok(money),
            _ => Err(D::Error::custom(format!("invalid unit price: {value}"))),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(4, 50).cents(), 450);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1200).to_string(), "$12.00");
        assert_eq!(Money::from_cents(450).to_string(), "$4.50");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(450);
        let b = Money::from_cents(300);

        assert_eq!((a + b).cents(), 750);
        assert_eq!((a - b).cents(), 150);
        assert_eq!((a * 2).cents(), 900);

        let total: Money = [a * 2, b].into_iter().sum();
        assert_eq!(total.cents(), 1200);
    }

    #[test]
    fn test_multiply_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(3).cents(), i64::MAX);
    }

    #[test]
    fn test_float_edge_rounds_to_cents() {
        assert_eq!(Money::from_major_f64(4.5), Some(Money::from_cents(450)));
        assert_eq!(Money::from_major_f64(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_major_f64(f64::INFINITY), None);
        assert_eq!(Money::from_cents(1299).to_major_f64(), 12.99);
    }

    #[test]
    fn test_parse_price_attr() {
        assert_eq!(Money::parse_price_attr("4.50"), Some(Money::from_cents(450)));
        assert_eq!(Money::parse_price_attr("3"), Some(Money::from_cents(300)));
        assert_eq!(Money::parse_price_attr(".75"), Some(Money::from_cents(75)));
        assert_eq!(Money::parse_price_attr("4.505"), Some(Money::from_cents(451)));
        assert_eq!(Money::parse_price_attr("4.504"), Some(Money::from_cents(450)));

        assert_eq!(Money::parse_price_attr(""), None);
        assert_eq!(Money::parse_price_attr("."), None);
        assert_eq!(Money::parse_price_attr("-4.50"), None);
        assert_eq!(Money::parse_price_attr("4,50"), None);
        assert_eq!(Money::parse_price_attr("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_display_price() {
        assert_eq!(Money::parse_display_price("$4.50"), Money::from_cents(450));
        assert_eq!(Money::parse_display_price("  $12 "), Money::from_cents(1200));
        assert_eq!(Money::parse_display_price("4.50 USD"), Money::from_cents(450));
        assert_eq!(Money::parse_display_price("1.2.3"), Money::from_cents(120));
    }

    #[test]
    fn test_parse_display_price_degrades_to_zero() {
        assert_eq!(Money::parse_display_price(""), Money::zero());
        assert_eq!(Money::parse_display_price("Ask the barista"), Money::zero());
        assert_eq!(Money::parse_display_price("$."), Money::zero());
        assert_eq!(
            Money::parse_display_price("$99999999999999999999999"),
            Money::zero()
        );
    }

    #[test]
    fn test_major_units_adapter() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "major_units")]
            price: Money,
        }

        let json = serde_json::to_string(&Wrapper {
            price: Money::from_cents(450),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":4.5}"#);

        let back: Wrapper = serde_json::from_str(r#"{"price":3}"#).unwrap();
        assert_eq!(back.price, Money::from_cents(300));

        assert!(serde_json::from_str::<Wrapper>(r#"{"price":-1}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"price":90071992547409.93}"#).is_err());
    }

    #[test]
    fn test_prices_above_max_are_rejected() {
        assert_eq!(Money::parse_price_attr("90071992547409.93"), None);
        assert_eq!(Money::parse_price_attr("10000000000000.01"), None);
        assert_eq!(
            Money::parse_price_attr("10000000000000"),
            Some(Money::MAX_UNIT_PRICE)
        );
        assert_eq!(Money::parse_display_price("$90071992547409.93"), Money::zero());
    }

    #[test]
    fn test_prices_up_to_max_survive_major_units() {
        for cents in [
            1,
            450,
            Money::MAX_UNIT_PRICE.cents() - 7,
            Money::MAX_UNIT_PRICE.cents() - 1,
            Money::MAX_UNIT_PRICE.cents(),
        ] {
            let money = Money::from_cents(cents);
            assert_eq!(Money::from_major_f64(money.to_major_f64()), Some(money));
        }
    }
}
