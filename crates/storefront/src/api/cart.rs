//! Remote cart gateway (authenticated users only, never cached).
//!
//! The backend acknowledges mutations with either the affected line item
//! (`POST`) or a plain message (`PUT`/`DELETE`); only `GET /cart` returns the
//! authoritative snapshot. The controller therefore refetches after every
//! mutation rather than patching local state from these responses.

use secrecy::SecretString;
use serde::Serialize;
use tracing::instrument;

use kiosk_core::{Cart, CartItemId, CartLine, ProductId};

use super::{ApiClient, ApiError, ApiMessage, bearer};

#[derive(Serialize)]
struct AddToCartBody {
    product_id: ProductId,
    quantity: u32,
}

impl ApiClient {
    /// Fetch the authoritative server cart (`GET /cart`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn cart(&self, token: &SecretString) -> Result<Cart, ApiError> {
        let url = self.endpoint("cart")?;
        self.send(bearer(self.http().get(url), token)).await
    }

    /// Add a product to the server cart (`POST /cart`).
    ///
    /// The backend folds repeated adds of the same product into one line.
    /// Returns the affected line item, not the whole cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id, quantity))]
    pub async fn cart_add(
        &self,
        token: &SecretString,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLine, ApiError> {
        let url = self.endpoint("cart")?;
        let body = AddToCartBody {
            product_id,
            quantity,
        };
        self.send(bearer(self.http().post(url), token).json(&body))
            .await
    }

    /// Set a line item quantity (`PUT /cart/{id}?quantity=`).
    ///
    /// A quantity of zero removes the item server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(item_id = %item_id, quantity))]
    pub async fn cart_update(
        &self,
        token: &SecretString,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("cart/{item_id}"))?;
        let request = bearer(self.http().put(url), token).query(&[("quantity", quantity)]);
        let _: ApiMessage = self.send(request).await?;
        Ok(())
    }

    /// Remove a line item (`DELETE /cart/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token), fields(item_id = %item_id))]
    pub async fn cart_remove(
        &self,
        token: &SecretString,
        item_id: CartItemId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("cart/{item_id}"))?;
        let _: ApiMessage = self.send(bearer(self.http().delete(url), token)).await?;
        Ok(())
    }

    /// Clear the server cart (`DELETE /cart`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn cart_clear(&self, token: &SecretString) -> Result<(), ApiError> {
        let url = self.endpoint("cart")?;
        let _: ApiMessage = self.send(bearer(self.http().delete(url), token)).await?;
        Ok(())
    }
}
