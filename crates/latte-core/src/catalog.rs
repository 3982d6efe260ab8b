//! # Menu Catalog
//!
//! The static menu the page shows. Read-only: the cart consumes a catalog
//! entry's name, price and image, and category filtering only decides which
//! entries are visible.
//!
//! ## Price Resolution
//! ```text
//! price_attr = Some("4.50")  ──► parse_price_attr ──► ok?  ──► $4.50
//!                                                      │
//!                                                      ▼ no / absent
//! price_text = "$4.50"       ──► parse_display_price ───────► $4.50 (or $0.00)
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// One menu entry as it appears on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    /// Category tag used by the filter buttons ("coffee", "pastry", ...).
    pub category: String,
    /// Displayed price text, e.g. `$4.50`.
    pub price_text: String,
    /// Machine-readable price attribute, preferred when present.
    #[serde(default)]
    pub price_attr: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price_text: impl Into<String>) -> Self {
        CatalogEntry {
            name: name.into(),
            category: category.into(),
            price_text: price_text.into(),
            price_attr: None,
            image_url: None,
        }
    }

    pub fn with_price_attr(mut self, attr: impl Into<String>) -> Self {
        self.price_attr = Some(attr.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Resolved unit price. Never fails; unreadable prices are zero.
    pub fn unit_price(&self) -> Money {
        self.price_attr
            .as_deref()
            .and_then(Money::parse_price_attr)
            .unwrap_or_else(|| Money::parse_display_price(&self.price_text))
    }
}

/// Which catalog entries are visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parses a filter button's value; `"all"` (any case) shows everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(tag) => entry.category == *tag,
        }
    }
}

/// The full menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Catalog { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Entries visible under `filter`, in catalog order.
    pub fn visible<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |e| filter.matches(e))
    }

    /// Distinct category tags in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.category.as_str()) {
                seen.push(entry.category.as_str());
            }
        }
        seen
    }
}
