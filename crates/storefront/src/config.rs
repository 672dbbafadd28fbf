//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VITRINE_CATALOG_URL` - Base URL of the remote product catalog
//!   (default: `https://fakestoreapi.com`)
//! - `VITRINE_CART_PATH` - Path of the durable cart slot (default: `cart.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default public catalog endpoint.
const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

/// Default durable cart slot path.
const DEFAULT_CART_PATH: &str = "cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the remote product catalog
    pub catalog_url: Url,
    /// Path of the durable cart slot
    pub cart_path: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = get_env_or_default("VITRINE_CATALOG_URL", DEFAULT_CATALOG_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_CATALOG_URL".to_string(), e.to_string())
            })?;
        let cart_path = PathBuf::from(get_env_or_default("VITRINE_CART_PATH", DEFAULT_CART_PATH));

        Ok(Self {
            catalog_url,
            cart_path,
        })
    }

    /// Build a configuration pointing at an explicit catalog, for callers
    /// that don't go through the environment.
    #[must_use]
    pub fn with_catalog(catalog_url: Url, cart_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_url,
            cart_path: cart_path.into(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
