//! Pure derived view over the cached product list.
//!
//! Name substring (case-insensitive) plus optional price bounds. Bound
//! setters parse leniently: empty or non-numeric input clears the bound
//! rather than erroring, since filter fields come straight from the user.

use rust_decimal::Decimal;

use kiosk_core::Product;

/// Transient, in-memory filter criteria.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    search: String,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

impl ProductFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name search term. Matching is case-insensitive; an empty term
    /// matches everything.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Set the minimum price from raw user input.
    pub fn set_min_price(&mut self, raw: &str) {
        self.min_price = parse_bound(raw);
    }

    /// Set the maximum price from raw user input.
    pub fn set_max_price(&mut self, raw: &str) {
        self.max_price = parse_bound(raw);
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn min_price(&self) -> Option<Decimal> {
        self.min_price
    }

    #[must_use]
    pub fn max_price(&self) -> Option<Decimal> {
        self.max_price
    }

    /// Derive the visible subsequence of `products`.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let term = self.search.trim().to_lowercase();
        products
            .iter()
            .filter(|p| term.is_empty() || p.name.to_lowercase().contains(&term))
            .filter(|p| self.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| self.max_price.is_none_or(|max| p.price <= max))
            .collect()
    }
}

/// Empty or malformed input means "no constraint", never an error.
fn parse_bound(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}
