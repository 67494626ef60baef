//! Core types for Kiosk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod price;
pub mod user;

pub use cart::{Cart, CartLine};
pub use catalog::{Category, CategoryInput, Product, ProductInput};
pub use id::*;
pub use price::format_price;
pub use user::{Credentials, Token, User};
