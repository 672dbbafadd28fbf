//! Category-driven catalog browsing.
//!
//! Tracks the selected category, fetches the matching product subset, and
//! guards overlapping fetches: every fetch takes a monotonically increasing
//! sequence number and only the most recently issued fetch may populate the
//! displayed set. A slow, stale response is discarded instead of overwriting
//! a newer selection's result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::instrument;

use crate::catalog::{Catalog, CatalogError, Product, ProductCache};

/// Number of products shown in the trending strip.
pub const TRENDING_COUNT: usize = 3;

/// The active product filter: every product, or a single category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Show the whole catalog.
    #[default]
    All,
    /// Show one category's subset.
    Category(String),
}

impl Selection {
    /// Parse a control value; `"all"` (any case) selects every product.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(name) => f.write_str(name),
        }
    }
}

// =============================================================================
// CatalogBrowser
// =============================================================================

/// Drives category selection and the grid's fetch/render cycle.
pub struct CatalogBrowser<C> {
    catalog: C,
    cache: ProductCache,
    state: Mutex<BrowserState>,
    fetch_seq: AtomicU64,
}

#[derive(Default)]
struct BrowserState {
    selection: Selection,
    products: Vec<Product>,
}

impl<C: Catalog> CatalogBrowser<C> {
    /// Create a browser with the default `"all"` selection.
    #[must_use]
    pub fn new(catalog: C, cache: ProductCache) -> Self {
        Self {
            catalog,
            cache,
            state: Mutex::new(BrowserState::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// The currently selected category.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.lock_state().selection.clone()
    }

    /// The most recently displayed product set.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock_state().products.clone()
    }

    /// Select a category and fetch the matching product subset.
    ///
    /// Returns `Ok(None)` when a newer selection was issued while this fetch
    /// was in flight; the stale result is discarded and the display keeps
    /// the newer selection's products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the fetch fails; the product area shows a
    /// failure notice and nothing is retried.
    #[instrument(skip(self), fields(selection = %selection))]
    pub async fn select_category(
        &self,
        selection: Selection,
    ) -> Result<Option<Vec<Product>>, CatalogError> {
        self.lock_state().selection = selection.clone();
        self.fetch(selection).await
    }

    /// Re-fetch the product subset for the current selection.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the fetch fails.
    pub async fn refresh(&self) -> Result<Option<Vec<Product>>, CatalogError> {
        let selection = self.selection();
        self.fetch(selection).await
    }

    /// Fetch the category names for the filter controls.
    ///
    /// The synthetic "All" control is the caller's to prepend.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the fetch fails.
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        self.catalog.list_categories().await
    }

    /// The top rated products for the landing view.
    ///
    /// Fetches the full catalog, seeds the product cache with all of it, and
    /// keeps the [`TRENDING_COUNT`] highest rated products. The sort is
    /// stable, so rating ties keep their catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the fetch fails.
    #[instrument(skip(self))]
    pub async fn trending(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.catalog.list_all().await?;
        self.cache.remember(&products).await;

        products.sort_by(|a, b| {
            b.rating
                .rate
                .partial_cmp(&a.rating.rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        products.truncate(TRENDING_COUNT);
        Ok(products)
    }

    async fn fetch(&self, selection: Selection) -> Result<Option<Vec<Product>>, CatalogError> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let result = match &selection {
            Selection::All => self.catalog.list_all().await,
            Selection::Category(name) => self.catalog.list_by_category(name).await,
        };
        let products = match result {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(error = %e, selection = %selection, "failed to load products");
                return Err(e);
            }
        };

        // Seed the cache even for stale results; the data itself is valid.
        self.cache.remember(&products).await;

        let mut state = self.lock_state();
        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "discarding stale fetch result");
            return Ok(None);
        }
        state.products = products.clone();
        Ok(Some(products))
    }

    fn lock_state(&self) -> MutexGuard<'_, BrowserState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
