//! In-session product cache.

use moka::future::Cache;

use vitrine_core::ProductId;

use super::types::Product;

/// Append-only in-memory product cache.
///
/// Populated opportunistically as catalog responses arrive so the detail and
/// add-to-cart paths can skip a network round trip. An entry keeps its
/// first-seen state; it is never overwritten, evicted, or persisted.
#[derive(Clone)]
pub struct ProductCache {
    products: Cache<ProductId, Product>,
}

impl ProductCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: Cache::builder().build(),
        }
    }

    /// Remember every product whose id has not been seen yet.
    pub async fn remember(&self, products: &[Product]) {
        for product in products {
            if self.products.get(&product.id).await.is_none() {
                self.products.insert(product.id, product.clone()).await;
            }
        }
    }

    /// Look up a previously seen product.
    pub async fn lookup(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).await
    }
}

impl Default for ProductCache {
    fn default() -> Self {
        Self::new()
    }
}
