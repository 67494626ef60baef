//! Admin catalog management commands.
//!
//! All of these require an admin session (`kiosk login <user> --admin`).
//! The gate here only shapes the UX; the backend still enforces
//! authorization on every mutation.

use clap::Subcommand;
use rust_decimal::Decimal;

use kiosk_core::{CategoryId, CategoryInput, ProductId, ProductInput};
use kiosk_storefront::{Result, Storefront};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// Create a new product
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        /// Price in the store currency
        #[arg(long)]
        price: Decimal,

        /// Category id
        #[arg(long)]
        category: i64,

        #[arg(long)]
        image_url: Option<String>,

        /// Units in stock
        #[arg(long, default_value_t = 0)]
        stock: i64,
    },
    /// Replace an existing product
    Update {
        /// Product id
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        category: i64,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long, default_value_t = 0)]
        stock: i64,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a new category
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// Replace an existing category
    Update {
        /// Category id
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a category (product cleanup is the backend's decision)
    Delete {
        /// Category id
        id: i64,
    },
}

pub async fn run(app: &mut Storefront, action: AdminAction) -> Result<()> {
    let mut editor = app.admin_editor()?;

    match action {
        AdminAction::Product { action } => match action {
            ProductAction::Create {
                name,
                description,
                price,
                category,
                image_url,
                stock,
            } => {
                let product = editor
                    .create_product(&ProductInput {
                        name,
                        description,
                        price,
                        image_url,
                        category_id: CategoryId::new(category),
                        stock,
                    })
                    .await?;
                println!("Created product [{}] {}", product.id, product.name);
            }
            ProductAction::Update {
                id,
                name,
                description,
                price,
                category,
                image_url,
                stock,
            } => {
                let product = editor
                    .update_product(
                        ProductId::new(id),
                        &ProductInput {
                            name,
                            description,
                            price,
                            image_url,
                            category_id: CategoryId::new(category),
                            stock,
                        },
                    )
                    .await?;
                println!("Updated product [{}] {}", product.id, product.name);
            }
            ProductAction::Delete { id } => {
                editor.delete_product(ProductId::new(id)).await?;
                println!("Deleted product [{id}]");
            }
        },
        AdminAction::Category { action } => match action {
            CategoryAction::Create { name, description } => {
                let category = editor
                    .create_category(&CategoryInput { name, description })
                    .await?;
                println!("Created category [{}] {}", category.id, category.name);
            }
            CategoryAction::Update {
                id,
                name,
                description,
            } => {
                let category = editor
                    .update_category(CategoryId::new(id), &CategoryInput { name, description })
                    .await?;
                println!("Updated category [{}] {}", category.id, category.name);
            }
            CategoryAction::Delete { id } => {
                editor.delete_category(CategoryId::new(id)).await?;
                println!("Deleted category [{id}]");
            }
        },
    }
    Ok(())
}
