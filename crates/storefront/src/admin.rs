//! Admin catalog CRUD orchestration.
//!
//! The editor is only handed out by the controller when the session carries
//! the admin flag; that gate is a UI convenience, not a security boundary.
//! The backend enforces authorization and its rejections surface as ordinary
//! backend errors.
//!
//! Every mutation is followed by a full refetch of the affected collection,
//! never an optimistic local patch, so the view always reflects backend
//! truth.

use secrecy::SecretString;

use kiosk_core::{Category, CategoryId, CategoryInput, Product, ProductId, ProductInput};

use crate::api::ApiClient;
use crate::catalog::CatalogStore;
use crate::error::Result;

/// Borrowed admin editing surface over the catalog.
#[derive(Debug)]
pub struct AdminCatalogEditor<'a> {
    pub(crate) api: &'a ApiClient,
    pub(crate) token: &'a SecretString,
    pub(crate) catalog: &'a mut CatalogStore,
}

impl AdminCatalogEditor<'_> {
    /// Create a product and refetch the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation or the refetch fails.
    pub async fn create_product(&mut self, input: &ProductInput) -> Result<Product> {
        let product = self.api.create_product(self.token, input).await?;
        self.catalog.refresh_products(self.api).await?;
        Ok(product)
    }

    /// Update a product and refetch the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation or the refetch fails.
    pub async fn update_product(
        &mut self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product> {
        let product = self.api.update_product(self.token, id, input).await?;
        self.catalog.refresh_products(self.api).await?;
        Ok(product)
    }

    /// Delete a product and refetch the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation or the refetch fails.
    pub async fn delete_product(&mut self, id: ProductId) -> Result<()> {
        self.api.delete_product(self.token, id).await?;
        self.catalog.refresh_products(self.api).await?;
        Ok(())
    }

    /// Create a category and refetch the category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation or the refetch fails.
    pub async fn create_category(&mut self, input: &CategoryInput) -> Result<Category> {
        let category = self.api.create_category(self.token, input).await?;
        self.catalog.refresh_categories(self.api).await?;
        Ok(category)
    }

    /// Update a category and refetch the category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation or the refetch fails.
    pub async fn update_category(
        &mut self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category> {
        let category = self.api.update_category(self.token, id, input).await?;
        self.catalog.refresh_categories(self.api).await?;
        Ok(category)
    }

    /// Delete a category and refetch the category list.
    ///
    /// Cascade behavior for products in the category is the backend's call;
    /// the refetched lists reflect whatever it decided.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation or the refetch fails.
    pub async fn delete_category(&mut self, id: CategoryId) -> Result<()> {
        self.api.delete_category(self.token, id).await?;
        self.catalog.refresh_categories(self.api).await?;
        Ok(())
    }
}
