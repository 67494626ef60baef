//! Kiosk storefront library.
//!
//! The shared client core behind every Kiosk shell: it talks to the store
//! backend over HTTP, keeps a durable guest cart with client-computed totals,
//! and switches transparently to the server-backed cart once a user signs in.
//!
//! # Architecture
//!
//! - [`api::ApiClient`] - thin typed wrapper over the backend REST endpoints
//! - [`cart::LocalCart`] - guest cart persisted through [`storage`]
//! - [`session::SessionManager`] - Guest/Authenticated state machine
//! - [`catalog::CatalogStore`] + [`filter::ProductFilter`] - the read path
//! - [`admin::AdminCatalogEditor`] - admin-gated catalog CRUD
//! - [`app::Storefront`] - the controller owning all of the above; shells
//!   call it and render the immutable snapshots it returns
//!
//! The cart routing rule lives in [`app::Storefront`]: while the session is
//! Guest every cart operation goes to the local store, while Authenticated
//! every operation goes to the backend followed by a refetch of the server
//! cart. The two carts are never merged.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod api;
pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod session;
pub mod storage;

pub use app::Storefront;
pub use error::{AppError, Result};
