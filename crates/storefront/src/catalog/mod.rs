//! Remote catalog REST client.
//!
//! # Architecture
//!
//! - The remote catalog is source of truth - NO local sync, direct API calls
//! - One request per operation: fail fast, no retry, no timeout
//! - Fetched products are remembered in a [`ProductCache`] by the callers
//!   that fetch them, so detail and add-to-cart paths can skip a round trip
//!
//! # Endpoints
//!
//! - `GET /products` - full catalog
//! - `GET /products/categories` - category names
//! - `GET /products/category/{name}` - category subset (name percent-encoded)
//! - `GET /products/{id}` - single product

mod cache;
mod types;

pub use cache::ProductCache;
pub use types::{Product, Rating};

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use vitrine_core::ProductId;

use crate::config::StorefrontConfig;

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product not found in the catalog.
    #[error("product not found: {0}")]
    NotFound(ProductId),
}

/// Read operations exposed by the product catalog.
///
/// The cart store and catalog browser depend on this trait rather than on
/// [`CatalogClient`] directly, so tests can inject an in-memory catalog.
pub trait Catalog: Send + Sync {
    /// List every product in the catalog.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// List the products in one category.
    fn list_by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// List the category names.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    /// Fetch a single product by id.
    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote catalog REST API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config
                    .catalog_url
                    .as_str()
                    .trim_end_matches('/')
                    .to_string(),
            }),
        }
    }

    /// Issue one GET request and decode the JSON body.
    ///
    /// The body is read as text first so parse failures can be logged with
    /// an excerpt of what the catalog actually sent.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(200).collect::<String>(),
                    "failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }
}

/// Build the category subset path, percent-encoding the category name.
fn category_path(category: &str) -> String {
    format!("products/category/{}", urlencoding::encode(category))
}

impl Catalog for CatalogClient {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json("products").await
    }

    #[instrument(skip(self))]
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.get_json(&category_path(category)).await
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.get_json("products/categories").await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        let path = format!("products/{id}");
        // Unknown ids come back as a 404 or as a null/empty body.
        match self.get_json::<Option<Product>>(&path).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(CatalogError::NotFound(id)),
            Err(CatalogError::Status(status)) if status == reqwest::StatusCode::NOT_FOUND => {
                Err(CatalogError::NotFound(id))
            }
            Err(CatalogError::Parse(e)) if e.is_eof() => Err(CatalogError::NotFound(id)),
            Err(e) => Err(e),
        }
    }
}
