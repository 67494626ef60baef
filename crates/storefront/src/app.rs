//! Top-level application controller.
//!
//! `Storefront` owns every component and is the single place the cart
//! routing rule lives: while the session is Guest, cart operations act
//! exclusively on the local store; while Authenticated, they act exclusively
//! on the remote gateway and are followed by an unconditional refetch of the
//! server cart. The two carts are never merged or cross-populated: signing
//! in parks the guest cart in storage untouched, and signing out returns
//! to it.
//!
//! Shells hold one `Storefront`, call its methods on user intent, and render
//! the immutable snapshots it returns.

use std::sync::Arc;

use kiosk_core::{Cart, CartItemId, Category, Credentials, Product, ProductId, User};

use crate::api::{ApiClient, ApiError};
use crate::cart::LocalCart;
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::filter::ProductFilter;
use crate::session::{LoginEntry, SessionManager};
use crate::storage::{FileStore, KeyValueStore};

/// The application state object: one per shell instance.
pub struct Storefront {
    api: ApiClient,
    session: SessionManager,
    local_cart: LocalCart,
    catalog: CatalogStore,
    filter: ProductFilter,
}

impl Storefront {
    /// Build from configuration: file-backed storage under the data dir,
    /// then session hydration from any stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed. A stale
    /// or rejected stored token is not an error; it is discarded.
    pub async fn init(config: &Config) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.data_dir));
        Ok(Self::with_parts(api, store).await)
    }

    /// Build from explicit parts (used by tests to inject a mock backend
    /// and an in-memory store).
    pub async fn with_parts(api: ApiClient, store: Arc<dyn KeyValueStore>) -> Self {
        let local_cart = LocalCart::load(Arc::clone(&store));
        let mut session = SessionManager::new(api.clone(), store);
        session.hydrate().await;

        Self {
            api,
            session,
            local_cart,
            catalog: CatalogStore::new(),
            filter: ProductFilter::new(),
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in. See [`SessionManager::login`] for the admin entry policy.
    ///
    /// # Errors
    ///
    /// Propagates login failures; the session stays Guest on any error.
    pub async fn login(&mut self, credentials: &Credentials, entry: LoginEntry) -> Result<User> {
        self.session.login(credentials, entry).await
    }

    /// Sign out. The server cart is simply no longer reachable (it lives on
    /// the backend); the guest cart in local storage is untouched.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    // =========================================================================
    // Cart (routing rule)
    // =========================================================================

    /// Current cart snapshot: server cart while authenticated, local cart
    /// while guest.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cart cannot be fetched.
    pub async fn cart(&self) -> Result<Cart> {
        match self.session.token() {
            Some(token) => Ok(self.api.cart(token).await?),
            None => Ok(self.local_cart.snapshot()),
        }
    }

    /// Add a product to the active cart.
    ///
    /// Guest path: resolves the product snapshot (cached catalog first, then
    /// `GET /products/{id}`) and mutates the local store. Authenticated
    /// path: `POST /cart` followed by the unconditional refetch.
    ///
    /// # Errors
    ///
    /// `AppError::UnknownProduct` if the product does not exist; otherwise
    /// backend or storage failures. On failure no cart state has changed.
    pub async fn add_to_cart(&mut self, product_id: ProductId, quantity: u32) -> Result<Cart> {
        let token = self.session.token().cloned();
        match token {
            Some(token) => {
                self.api.cart_add(&token, product_id, quantity).await?;
                Ok(self.api.cart(&token).await?)
            }
            None => {
                let product = self.resolve_product(product_id).await?;
                self.local_cart.add(&product, quantity)?;
                Ok(self.local_cart.snapshot())
            }
        }
    }

    /// Set a line item quantity exactly. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Backend or storage failures; no cart state changes on failure.
    pub async fn update_cart_item(&mut self, item_id: CartItemId, quantity: u32) -> Result<Cart> {
        let token = self.session.token().cloned();
        match token {
            Some(token) => {
                self.api.cart_update(&token, item_id, quantity).await?;
                Ok(self.api.cart(&token).await?)
            }
            None => {
                self.local_cart.update_quantity(item_id, quantity)?;
                Ok(self.local_cart.snapshot())
            }
        }
    }

    /// Remove a line item from the active cart.
    ///
    /// # Errors
    ///
    /// Backend or storage failures; no cart state changes on failure.
    pub async fn remove_cart_item(&mut self, item_id: CartItemId) -> Result<Cart> {
        let token = self.session.token().cloned();
        match token {
            Some(token) => {
                self.api.cart_remove(&token, item_id).await?;
                Ok(self.api.cart(&token).await?)
            }
            None => {
                self.local_cart.remove(item_id)?;
                Ok(self.local_cart.snapshot())
            }
        }
    }

    /// Empty the active cart.
    ///
    /// # Errors
    ///
    /// Backend or storage failures; no cart state changes on failure.
    pub async fn clear_cart(&mut self) -> Result<Cart> {
        let token = self.session.token().cloned();
        match token {
            Some(token) => {
                self.api.cart_clear(&token).await?;
                Ok(self.api.cart(&token).await?)
            }
            None => {
                self.local_cart.clear()?;
                Ok(self.local_cart.snapshot())
            }
        }
    }

    // =========================================================================
    // Catalog read path
    // =========================================================================

    /// Refetch categories and the scoped product list.
    ///
    /// # Errors
    ///
    /// Returns an error if either fetch fails.
    pub async fn refresh_catalog(&mut self) -> Result<()> {
        self.catalog.refresh_categories(&self.api).await?;
        self.catalog.refresh_products(&self.api).await?;
        Ok(())
    }

    /// Change the category scope and refetch products.
    ///
    /// # Errors
    ///
    /// Returns an error if the product fetch fails.
    pub async fn select_category(&mut self, category: Option<kiosk_core::CategoryId>) -> Result<()> {
        self.catalog.select_category(category);
        self.catalog.refresh_products(&self.api).await?;
        Ok(())
    }

    /// The visible product list: the cached products with the filter applied.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(self.catalog.products())
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.set_search(term);
    }

    pub fn set_min_price(&mut self, raw: &str) {
        self.filter.set_min_price(raw);
    }

    pub fn set_max_price(&mut self, raw: &str) {
        self.filter.set_max_price(raw);
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Borrow the admin editing surface.
    ///
    /// # Errors
    ///
    /// `AppError::NotAuthenticated` for guests, `AppError::NotAdmin` for
    /// signed-in non-admin users.
    pub fn admin_editor(&mut self) -> Result<crate::admin::AdminCatalogEditor<'_>> {
        if !self.session.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }
        if !self.session.is_admin() {
            return Err(AppError::NotAdmin);
        }
        let token = self.session.token().ok_or(AppError::NotAuthenticated)?;
        Ok(crate::admin::AdminCatalogEditor {
            api: &self.api,
            token,
            catalog: &mut self.catalog,
        })
    }

    /// Resolve a product snapshot for the guest cart path.
    async fn resolve_product(&mut self, product_id: ProductId) -> Result<Product> {
        if let Some(product) = self.catalog.product(product_id) {
            return Ok(product.clone());
        }
        match self.api.product(product_id).await {
            Ok(product) => Ok(product),
            Err(ApiError::Status { status: 404, .. }) => Err(AppError::UnknownProduct(product_id)),
            Err(e) => Err(e.into()),
        }
    }
}
