//! Catalog endpoints: public reads (cached) and admin mutations.
//!
//! Reads go through the moka cache keyed by category scope. Every admin
//! mutation invalidates the whole catalog cache before returning, so the
//! refetch that follows a mutation always reflects backend truth.

use secrecy::SecretString;
use tracing::{debug, instrument};

use kiosk_core::{Category, CategoryId, CategoryInput, Product, ProductId, ProductInput};

use super::{ApiClient, ApiError, ApiMessage, CacheValue, bearer};

const CATEGORIES_CACHE_KEY: &str = "categories";

fn products_cache_key(category: Option<CategoryId>) -> String {
    category.map_or_else(
        || "products:all".to_owned(),
        |id| format!("products:{id}"),
    )
}

impl ApiClient {
    // =========================================================================
    // Public reads
    // =========================================================================

    /// List all categories (`GET /categories`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(cached)) = self.cache().get(CATEGORIES_CACHE_KEY).await {
            debug!("cache hit for categories");
            return Ok(cached);
        }

        let url = self.endpoint("categories")?;
        let categories: Vec<Category> = self.send(self.http().get(url)).await?;

        self.cache()
            .insert(
                CATEGORIES_CACHE_KEY.to_owned(),
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    /// List products, optionally scoped to a category
    /// (`GET /products?category_id=`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, category: Option<CategoryId>) -> Result<Vec<Product>, ApiError> {
        let cache_key = products_cache_key(category);

        if let Some(CacheValue::Products(cached)) = self.cache().get(&cache_key).await {
            debug!("cache hit for products");
            return Ok(cached);
        }

        let url = self.endpoint("products")?;
        let mut request = self.http().get(url);
        if let Some(id) = category {
            request = request.query(&[("category_id", id.as_i64())]);
        }
        let products: Vec<Product> = self.send(request).await?;

        self.cache()
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Fetch a single product (`GET /products/{id}`). Not cached; used by
    /// the guest add-to-cart path when the catalog store is cold.
    ///
    /// # Errors
    ///
    /// `ApiError::Status` with 404 when the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        self.send(self.http().get(url)).await
    }

    // =========================================================================
    // Admin mutations (bearer token required)
    // =========================================================================

    /// Create a category (`POST /categories`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, input), fields(name = %input.name))]
    pub async fn create_category(
        &self,
        token: &SecretString,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        let url = self.endpoint("categories")?;
        let category = self.send(bearer(self.http().post(url), token).json(input)).await?;
        self.invalidate_catalog().await;
        Ok(category)
    }

    /// Update a category (`PUT /categories/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        token: &SecretString,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        let url = self.endpoint(&format!("categories/{id}"))?;
        let category = self.send(bearer(self.http().put(url), token).json(input)).await?;
        self.invalidate_catalog().await;
        Ok(category)
    }

    /// Delete a category (`DELETE /categories/{id}`).
    ///
    /// The backend owns cascade semantics; the client just reflects whatever
    /// the next refetch returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(category_id = %id))]
    pub async fn delete_category(
        &self,
        token: &SecretString,
        id: CategoryId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("categories/{id}"))?;
        let _: ApiMessage = self.send(bearer(self.http().delete(url), token)).await?;
        self.invalidate_catalog().await;
        Ok(())
    }

    /// Create a product (`POST /products`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, input), fields(name = %input.name))]
    pub async fn create_product(
        &self,
        token: &SecretString,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let url = self.endpoint("products")?;
        let product = self.send(bearer(self.http().post(url), token).json(input)).await?;
        self.invalidate_catalog().await;
        Ok(product)
    }

    /// Update a product (`PUT /products/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        token: &SecretString,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let product = self.send(bearer(self.http().put(url), token).json(input)).await?;
        self.invalidate_catalog().await;
        Ok(product)
    }

    /// Delete a product (`DELETE /products/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub async fn delete_product(&self, token: &SecretString, id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let _: ApiMessage = self.send(bearer(self.http().delete(url), token)).await?;
        self.invalidate_catalog().await;
        Ok(())
    }

    /// Drop all cached catalog responses.
    pub async fn invalidate_catalog(&self) {
        self.cache().invalidate_all();
        self.cache().run_pending_tasks().await;
    }
}
