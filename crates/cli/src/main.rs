//! Kiosk CLI - Command-line storefront shell.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! kiosk products --search apple --max-price 20000
//! kiosk categories
//!
//! # Cart (guest cart persists between invocations; after login the same
//! # commands operate on the server cart)
//! kiosk cart add 3 --quantity 2
//! kiosk cart show
//! kiosk cart update 3 5
//! kiosk cart clear
//!
//! # Session
//! kiosk login alice
//! kiosk login root --admin
//! kiosk logout
//!
//! # Admin catalog management
//! kiosk admin category create --name "Fruit"
//! kiosk admin product create --name "Apple" --description "Fresh" \
//!     --price 12500 --category 1 --stock 50
//! ```
//!
//! # Environment Variables
//!
//! - `KIOSK_API_URL` - Base URL of the store backend (required)
//! - `KIOSK_DATA_DIR` - Where the guest cart and token live (default `.kiosk`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use kiosk_storefront::Storefront;
use kiosk_storefront::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(author, version, about = "Kiosk storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, with optional filtering
    Products {
        /// Only products in this category
        #[arg(long)]
        category: Option<i64>,

        /// Case-insensitive name substring
        #[arg(long)]
        search: Option<String>,

        /// Minimum price (malformed input means no bound)
        #[arg(long)]
        min_price: Option<String>,

        /// Maximum price (malformed input means no bound)
        #[arg(long)]
        max_price: Option<String>,
    },
    /// List categories
    Categories,
    /// Cart operations (guest or server cart, depending on session)
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Sign in
    Login {
        /// Username
        username: String,

        /// Use the admin entry point (rejects non-admin accounts)
        #[arg(long)]
        admin: bool,

        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out (guest cart is kept)
    Logout,
    /// Show the current session
    Whoami,
    /// Admin catalog management
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let mut app = Storefront::init(&config).await?;

    match cli.command {
        Commands::Products {
            category,
            search,
            min_price,
            max_price,
        } => {
            commands::catalog::products(&mut app, category, search, min_price, max_price).await?;
        }
        Commands::Categories => commands::catalog::categories(&mut app).await?,
        Commands::Cart { action } => commands::cart::run(&mut app, action).await?,
        Commands::Login {
            username,
            admin,
            password,
        } => commands::auth::login(&mut app, username, password, admin).await?,
        Commands::Logout => commands::auth::logout(&mut app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Admin { action } => commands::admin::run(&mut app, action).await?,
    }
    Ok(())
}
