//! CLI command implementations over the [`kiosk_storefront::Storefront`]
//! controller.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;

use kiosk_core::{Cart, format_price};

/// Render a cart snapshot.
pub fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for line in &cart.items {
        println!(
            "  [{}] {} x{}  {}",
            line.id,
            line.product.name,
            line.quantity,
            format_price(line.line_total()),
        );
    }
    println!("Total: {}", format_price(cart.total));
}
