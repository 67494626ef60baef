//! Guest cart backed by durable client storage.
//!
//! The local cart owns the line items for unauthenticated sessions. Every
//! mutation flushes the full item list to storage before returning; the
//! total is never persisted, only derived from the items, so the two cannot
//! drift. A missing or corrupt stored cart loads as empty.

use std::sync::Arc;

use rust_decimal::Decimal;

use kiosk_core::{Cart, CartItemId, CartLine, Product};

use crate::storage::{KeyValueStore, StorageError, keys};

/// Client-persisted cart for guest sessions.
///
/// Guest lines are keyed by product id (there is at most one line per
/// product, so the product id is a valid line id within this cart).
pub struct LocalCart {
    items: Vec<CartLine>,
    store: Arc<dyn KeyValueStore>,
}

impl LocalCart {
    /// Load the cart from storage. Absent or corrupt data yields an empty
    /// cart, never an error.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items = store
            .get(keys::LOCAL_CART)
            .and_then(|raw| match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(items) => Some(items),
                Err(e) => {
                    tracing::warn!(error = %e, "stored guest cart is corrupt, starting empty");
                    None
                }
            })
            .unwrap_or_default();

        Self { items, store }
    }

    /// Add a product. An existing line for the same product has its quantity
    /// incremented; otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), StorageError> {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLine {
                id: CartItemId::new(product.id.as_i64()),
                product: product.clone(),
                quantity,
            });
        }
        self.persist()
    }

    /// Set a line quantity exactly (non-cumulative). Zero removes the line.
    /// Unknown item ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn update_quantity(&mut self, item_id: CartItemId, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            return self.remove(item_id);
        }
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item_id) {
            line.quantity = quantity;
            return self.persist();
        }
        Ok(())
    }

    /// Remove a line. Removing a missing line is a no-op (still persisted).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn remove(&mut self, item_id: CartItemId) -> Result<(), StorageError> {
        self.items.retain(|line| line.id != item_id);
        self.persist()
    }

    /// Remove all lines.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.persist()
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Total, recomputed from the items on every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Immutable snapshot for the view.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        Cart::from_lines(self.items.clone())
    }

    fn persist(&self) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(&self.items).map_err(|source| StorageError::Encode {
                key: keys::LOCAL_CART.to_owned(),
                source,
            })?;
        self.store.put(keys::LOCAL_CART, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use kiosk_core::{CategoryId, ProductId};

    fn product(id: i64, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            description: String::new(),
            price: price.parse().expect("valid decimal"),
            image_url: None,
            category_id: CategoryId::new(1),
            stock: 100,
            created_at: None,
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal")
    }

    fn empty_cart() -> LocalCart {
        LocalCart::load(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_repeated_adds_accumulate_into_one_line() {
        let mut cart = empty_cart();
        let apple = product(1, "10");

        cart.add(&apple, 1).expect("add");
        cart.add(&apple, 2).expect("add");
        cart.add(&apple, 4).expect("add");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn test_distinct_products_get_distinct_lines() {
        let mut cart = empty_cart();
        cart.add(&product(1, "10"), 1).expect("add");
        cart.add(&product(2, "20"), 1).expect("add");
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_total_matches_sum_invariant() {
        let mut cart = empty_cart();
        cart.add(&product(1, "10"), 2).expect("add");
        cart.add(&product(2, "3.5"), 3).expect("add");

        assert_eq!(cart.total(), dec("30.5"));
        // Idempotent with no intervening mutation.
        assert_eq!(cart.total(), dec("30.5"));
        assert_eq!(cart.snapshot().total, dec("30.5"));
    }

    #[test]
    fn test_update_quantity_sets_not_adds() {
        let mut cart = empty_cart();
        cart.add(&product(1, "10"), 5).expect("add");

        cart.update_quantity(CartItemId::new(1), 3).expect("update");
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total(), dec("30"));
    }

    #[test]
    fn test_zero_quantity_removes() {
        let mut cart = empty_cart();
        cart.add(&product(1, "10"), 5).expect("add");

        cart.update_quantity(CartItemId::new(1), 0).expect("update");
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_update_unknown_item_is_noop() {
        let mut cart = empty_cart();
        cart.add(&product(1, "10"), 1).expect("add");
        cart.update_quantity(CartItemId::new(99), 3).expect("update");
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = empty_cart();
        cart.add(&product(1, "10"), 1).expect("add");
        cart.add(&product(2, "20"), 1).expect("add");

        cart.remove(CartItemId::new(1)).expect("remove");
        assert_eq!(cart.items().len(), 1);

        cart.clear().expect("clear");
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_persistence_roundtrip_fresh_instance() {
        let store = Arc::new(MemoryStore::new());

        let mut cart = LocalCart::load(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        cart.add(&product(1, "10"), 2).expect("add");
        cart.add(&product(2, "3.5"), 3).expect("add");
        let expected = cart.snapshot();

        let reloaded = LocalCart::load(store);
        assert_eq!(reloaded.snapshot(), expected);
        assert_eq!(reloaded.total(), dec("30.5"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");

        let mut cart = LocalCart::load(Arc::new(FileStore::new(dir.path())));
        cart.add(&product(7, "125.5"), 2).expect("add");

        let reloaded = LocalCart::load(Arc::new(FileStore::new(dir.path())));
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.total(), dec("251"));
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.put(keys::LOCAL_CART, "{not json").expect("put");

        let cart = LocalCart::load(store);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }
}
