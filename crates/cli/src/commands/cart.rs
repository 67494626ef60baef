//! Cart commands.
//!
//! These go through the controller, so the same command operates on the
//! guest cart or the server cart depending on the current session.

use clap::Subcommand;

use kiosk_core::{CartItemId, ProductId};
use kiosk_storefront::{Result, Storefront};

use super::print_cart;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the active cart
    Show,
    /// Add a product
    Add {
        /// Product id
        product_id: i64,

        /// Units to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line item quantity (0 or negative removes the item)
    Update {
        /// Line item id
        item_id: i64,

        /// New quantity
        quantity: i64,
    },
    /// Remove a line item
    Remove {
        /// Line item id
        item_id: i64,
    },
    /// Remove everything
    Clear,
}

pub async fn run(app: &mut Storefront, action: CartAction) -> Result<()> {
    let cart = match action {
        CartAction::Show => app.cart().await?,
        CartAction::Add {
            product_id,
            quantity,
        } => {
            app.add_to_cart(ProductId::new(product_id), quantity)
                .await?
        }
        CartAction::Update { item_id, quantity } => {
            // Negative input is treated as removal, same as zero.
            let quantity = u32::try_from(quantity.max(0)).unwrap_or(0);
            app.update_cart_item(CartItemId::new(item_id), quantity)
                .await?
        }
        CartAction::Remove { item_id } => app.remove_cart_item(CartItemId::new(item_id)).await?,
        CartAction::Clear => app.clear_cart().await?,
    };

    print_cart(&cart);
    Ok(())
}
