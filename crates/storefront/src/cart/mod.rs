//! Cart store: authoritative cart state with durable persistence.
//!
//! The store is the only writer of cart state. Every mutation recomputes the
//! derived totals, persists the full cart to the durable slot, and publishes
//! a fresh [`CartSummary`] to subscribers, so presentation code reacts to
//! explicit notifications instead of sharing ambient state.
//!
//! Invariant: at most one [`CartLine`] per product id.

mod storage;

pub use storage::{CartSlot, FileSlot, MemorySlot, StorageError};

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::instrument;

use vitrine_core::ProductId;

use crate::catalog::{Catalog, CatalogError, Product, ProductCache};

/// Errors surfaced by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Resolving the product against cache and catalog failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// One cart line: a product snapshot plus a quantity.
///
/// Serializes with the product fields flattened next to `quantity`, which is
/// the durable slot's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product as it looked when first added.
    #[serde(flatten)]
    pub product: Product,
    /// Units of this product in the cart, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: price × quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Derived cart totals published to subscribers after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Sum of line quantities (the badge number).
    pub item_count: u32,
    /// Sum of per-line subtotals.
    pub total: Decimal,
}

// =============================================================================
// CartStore
// =============================================================================

/// Owner of the authoritative cart state.
pub struct CartStore<C, S> {
    catalog: C,
    cache: ProductCache,
    slot: S,
    lines: Mutex<Vec<CartLine>>,
    updates: watch::Sender<CartSummary>,
}

impl<C: Catalog, S: CartSlot> CartStore<C, S> {
    /// Load the cart from the durable slot.
    ///
    /// An absent or unparseable slot recovers to an empty cart (logged, not
    /// surfaced). The normalized state is written back immediately so the
    /// slot is well-formed from the start of the session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot itself cannot be read or written.
    pub async fn load(catalog: C, cache: ProductCache, slot: S) -> Result<Self, StorageError> {
        let lines = match slot.load().await? {
            Some(payload) => match serde_json::from_str::<Vec<CartLine>>(&payload) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!(error = %e, "cart slot corrupt, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let (updates, _) = watch::channel(summarize(&lines));
        let store = Self {
            catalog,
            cache,
            slot,
            lines: Mutex::new(lines),
            updates,
        };
        store.persist().await?;
        Ok(store)
    }

    /// Add one unit of a product to the cart.
    ///
    /// The product resolves through the in-session cache first, falling back
    /// to one catalog fetch. Resolution failures are logged and returned so
    /// the UI can show an error state instead of dropping the add silently.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Catalog` if the product cannot be resolved and
    /// `CartError::Storage` if persisting the updated cart fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add(&self, id: ProductId) -> Result<CartSummary, CartError> {
        let product = match self.resolve(id).await {
            Ok(product) => product,
            Err(e) => {
                tracing::error!(error = %e, "failed to resolve product for cart add");
                return Err(e.into());
            }
        };

        let summary = {
            let mut lines = self.lock_lines();
            match lines.iter_mut().find(|line| line.product.id == id) {
                Some(line) => line.quantity += 1,
                None => lines.push(CartLine {
                    product,
                    quantity: 1,
                }),
            }
            summarize(&lines)
        };

        self.persist().await?;
        self.publish(summary);
        Ok(summary)
    }

    /// Remove a product's line entirely. No-op if the line is absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the updated cart fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove(&self, id: ProductId) -> Result<CartSummary, StorageError> {
        let summary = {
            let mut lines = self.lock_lines();
            lines.retain(|line| line.product.id != id);
            summarize(&lines)
        };

        self.persist().await?;
        self.publish(summary);
        Ok(summary)
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock_lines().clone()
    }

    /// Sum of per-line subtotals; exactly zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock_lines().iter().map(CartLine::subtotal).sum()
    }

    /// Sum of line quantities, displayed as the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock_lines().iter().map(|line| line.quantity).sum()
    }

    /// Subscribe to cart changes. Each mutation publishes a new summary.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSummary> {
        self.updates.subscribe()
    }

    /// Resolve a product, preferring the in-session cache.
    async fn resolve(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.cache.lookup(id).await {
            return Ok(product);
        }
        let product = self.catalog.get_by_id(id).await?;
        self.cache.remember(std::slice::from_ref(&product)).await;
        Ok(product)
    }

    /// Write the full cart to the durable slot.
    async fn persist(&self) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&*self.lock_lines())?;
        self.slot.save(&payload).await
    }

    fn publish(&self, summary: CartSummary) {
        self.updates.send_replace(summary);
    }

    fn lock_lines(&self) -> MutexGuard<'_, Vec<CartLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn summarize(lines: &[CartLine]) -> CartSummary {
    CartSummary {
        item_count: lines.iter().map(|line| line.quantity).sum(),
        total: lines.iter().map(CartLine::subtotal).sum(),
    }
}
