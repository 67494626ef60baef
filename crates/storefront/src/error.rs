//! Unified error handling for the storefront library.
//!
//! Each concern defines its own error (`ApiError`, `StorageError`,
//! `ConfigError`); this module folds them into a single `AppError` so the
//! controller and the shells deal with one type.

use kiosk_core::ProductId;
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend request failed (transport, non-success status, or bad body).
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Durable client storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration is missing or invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Operation requires a signed-in user.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Operation requires admin privileges.
    #[error("Admin privileges required")]
    NotAdmin,

    /// Referenced product does not exist in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

impl AppError {
    /// Whether the error came from the backend rejecting the request
    /// (as opposed to a transport or client-side failure).
    #[must_use]
    pub const fn is_backend_rejection(&self) -> bool {
        matches!(self, Self::Api(ApiError::Status { .. }))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
