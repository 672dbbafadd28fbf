//! Unified error handling for the storefront.
//!
//! Subsystems carry their own error enums; `AppError` is the top-level type
//! the bootstrap and presentation layers deal in. No failure is fatal to the
//! process and nothing is retried: the affected UI region shows a neutral
//! failure or empty state.

use thiserror::Error;

use crate::cart::{CartError, StorageError};
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote catalog call failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Durable cart slot failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
