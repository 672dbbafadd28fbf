//! Application state shared across the UI components.

use std::sync::Arc;

use crate::browser::CatalogBrowser;
use crate::cart::{CartStore, FileSlot, StorageError};
use crate::catalog::{CatalogClient, ProductCache};
use crate::config::StorefrontConfig;

/// Shared state wiring the storefront components together.
///
/// Cheaply cloneable via `Arc`. Presentation components receive this instead
/// of reaching for ambient globals; the cart store and catalog browser own
/// their state and expose explicit mutation APIs.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cache: ProductCache,
    cart: CartStore<CatalogClient, FileSlot>,
    browser: CatalogBrowser<CatalogClient>,
}

impl AppState {
    /// Wire up the components and load the persisted cart.
    ///
    /// The catalog client, product cache, cart store, and browser all share
    /// one cache instance, so every fetched product is visible to the detail
    /// and add-to-cart paths.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the durable cart slot cannot be read or
    /// written.
    pub async fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let catalog = CatalogClient::new(&config);
        let cache = ProductCache::new();
        let slot = FileSlot::new(config.cart_path.clone());
        let cart = CartStore::load(catalog.clone(), cache.clone(), slot).await?;
        let browser = CatalogBrowser::new(catalog.clone(), cache.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cache,
                cart,
                browser,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the in-session product cache.
    #[must_use]
    pub fn cache(&self) -> &ProductCache {
        &self.inner.cache
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore<CatalogClient, FileSlot> {
        &self.inner.cart
    }

    /// Get a reference to the catalog browser.
    #[must_use]
    pub fn browser(&self) -> &CatalogBrowser<CatalogClient> {
        &self.inner.browser
    }
}
