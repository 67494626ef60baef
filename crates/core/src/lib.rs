//! Kiosk Core - Shared types library.
//!
//! This crate provides common types used across all Kiosk components:
//! - `storefront` - The shared client library (session, carts, catalog)
//! - `cli` - Command-line storefront shell
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog/cart/user types, and price formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
