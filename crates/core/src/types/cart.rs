//! Cart domain types.
//!
//! A cart is an ordered list of line items plus a total. The total is always
//! derivable from the items; [`Cart::from_lines`] is the only constructor
//! that computes it, so the two can never drift on the client side.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Product;
use super::id::{CartItemId, ProductId};

/// One product-quantity pairing within a cart.
///
/// Carries a full product snapshot so the cart renders without a catalog
/// lookup. Within a single cart there is at most one line per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line (`product.price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// A cart snapshot: ordered line items and their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// Build a cart from line items, computing the total.
    #[must_use]
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total = items.iter().map(CartLine::line_total).sum();
        Self { items, total }
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Find the line holding a given product, if any.
    #[must_use]
    pub fn line_for_product(&self, product_id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::empty()
    }
}
