//! Client-side catalog state: the last-fetched products and categories.
//!
//! Read-only cached copies of backend-owned data. The store remembers the
//! selected category so product refetches stay scoped to it.

use kiosk_core::{Category, CategoryId, Product, ProductId};

use crate::api::{ApiClient, ApiError};

/// Holds the last-fetched catalog lists.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    categories: Vec<Category>,
    selected_category: Option<CategoryId>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refetch the category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the cached list is unchanged.
    pub async fn refresh_categories(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        self.categories = api.categories().await?;
        Ok(())
    }

    /// Refetch products, scoped to the selected category if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the cached list is unchanged.
    pub async fn refresh_products(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        self.products = api.products(self.selected_category).await?;
        Ok(())
    }

    /// Change the category scope. The caller is expected to follow up with
    /// [`refresh_products`](Self::refresh_products).
    pub fn select_category(&mut self, category: Option<CategoryId>) {
        self.selected_category = category;
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a cached product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a cached category by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}
