//! Catalog browsing commands.

use kiosk_core::{CategoryId, format_price};
use kiosk_storefront::{Result, Storefront};

/// List products with the filter applied.
pub async fn products(
    app: &mut Storefront,
    category: Option<i64>,
    search: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
) -> Result<()> {
    if let Some(term) = search {
        app.set_search(term);
    }
    if let Some(raw) = min_price {
        app.set_min_price(&raw);
    }
    if let Some(raw) = max_price {
        app.set_max_price(&raw);
    }

    app.refresh_catalog().await?;
    if let Some(id) = category {
        app.select_category(Some(CategoryId::new(id))).await?;
    }

    let visible = app.visible_products();
    if visible.is_empty() {
        println!("No products found");
        return Ok(());
    }

    for product in visible {
        let category_name = app
            .catalog()
            .category(product.category_id)
            .map_or("-", |c| c.name.as_str());
        println!(
            "[{}] {}  {}  ({category_name}, stock: {})",
            product.id,
            product.name,
            format_price(product.price),
            product.stock,
        );
    }
    Ok(())
}

/// List all categories.
pub async fn categories(app: &mut Storefront) -> Result<()> {
    app.refresh_catalog().await?;

    let categories = app.categories();
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    for category in categories {
        match &category.description {
            Some(description) => println!("[{}] {} - {description}", category.id, category.name),
            None => println!("[{}] {}", category.id, category.name),
        }
    }
    Ok(())
}
