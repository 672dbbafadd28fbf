//! End-to-end storefront flow against an in-memory catalog and cart slot:
//! browse, cache, add/remove, persist, and reload.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use vitrine_core::ProductId;
use vitrine_storefront::browser::{CatalogBrowser, Selection};
use vitrine_storefront::cart::{CartStore, MemorySlot};
use vitrine_storefront::catalog::{Catalog, CatalogError, Product, ProductCache, Rating};
use vitrine_storefront::views::{CartView, product_detail};

/// In-memory catalog with a fixed product list.
struct StubCatalog {
    products: Vec<Product>,
    get_by_id_calls: AtomicUsize,
}

impl StubCatalog {
    fn new(products: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            products,
            get_by_id_calls: AtomicUsize::new(0),
        })
    }
}

/// Local handle around the shared stub; the orphan rule forbids
/// `impl Catalog for Arc<StubCatalog>` outside the defining crate.
#[derive(Clone)]
struct SharedCatalog(Arc<StubCatalog>);

impl Catalog for SharedCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.0.products.clone())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .0
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let mut categories: Vec<String> =
            self.0.products.iter().map(|p| p.category.clone()).collect();
        categories.dedup();
        Ok(categories)
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.0.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.0
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}

fn product(id: i64, title: &str, category: &str, cents: i64, rate: f64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Decimal::new(cents, 2),
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://example.com/{id}.jpg"),
        rating: Rating { rate, count: 100 },
    }
}

fn fixture() -> Arc<StubCatalog> {
    StubCatalog::new(vec![
        product(1, "Backpack", "men's clothing", 109_95, 3.9),
        product(2, "Gold Ring", "jewelery", 168_00, 4.9),
        product(3, "Hard Drive", "electronics", 64_00, 4.8),
        product(4, "Monitor", "electronics", 999_99, 2.2),
    ])
}

#[tokio::test]
async fn browse_then_add_resolves_from_cache() {
    let catalog = fixture();
    let cache = ProductCache::new();
    let browser = CatalogBrowser::new(SharedCatalog(Arc::clone(&catalog)), cache.clone());
    let cart = CartStore::load(SharedCatalog(Arc::clone(&catalog)), cache.clone(), MemorySlot::new())
        .await
        .unwrap();

    // Browsing "electronics" seeds the cache with that subset.
    let shown = browser
        .select_category(Selection::Category("electronics".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown.len(), 2);

    // Adding a browsed product skips the per-id fetch entirely.
    cart.add(ProductId::new(3)).await.unwrap();
    assert_eq!(catalog.get_by_id_calls.load(Ordering::SeqCst), 0);

    // An unbrowsed product needs exactly one fetch, which then caches it.
    cart.add(ProductId::new(1)).await.unwrap();
    let detail = product_detail(&SharedCatalog(Arc::clone(&catalog)), &cache, ProductId::new(1))
        .await
        .unwrap();
    assert_eq!(detail.title, "Backpack");
    assert_eq!(catalog.get_by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cart_persists_flattened_lines_and_reloads() {
    let catalog = fixture();
    let slot = MemorySlot::new();
    let cart = CartStore::load(SharedCatalog(Arc::clone(&catalog)), ProductCache::new(), slot.clone())
        .await
        .unwrap();

    cart.add(ProductId::new(2)).await.unwrap();
    cart.add(ProductId::new(2)).await.unwrap();
    cart.add(ProductId::new(3)).await.unwrap();
    cart.remove(ProductId::new(3)).await.unwrap();

    // The slot holds an array of product fields flattened next to quantity.
    let payload: serde_json::Value =
        serde_json::from_str(&slot.payload().unwrap()).unwrap();
    let lines = payload.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], serde_json::json!(2));
    assert_eq!(lines[0]["title"], serde_json::json!("Gold Ring"));
    assert_eq!(lines[0]["quantity"], serde_json::json!(2));
    assert!(lines[0].get("product").is_none());

    // A fresh store sees the same (id, quantity) pairs and totals.
    let reloaded = CartStore::load(SharedCatalog(Arc::clone(&catalog)), ProductCache::new(), slot)
        .await
        .unwrap();
    assert_eq!(reloaded.item_count(), 2);
    assert_eq!(reloaded.total(), Decimal::new(336_00, 2));

    let view = CartView::from(reloaded.lines().as_slice());
    assert_eq!(view.subtotal, "$336.00");
}

#[tokio::test]
async fn corrupt_or_absent_slot_starts_empty() {
    let catalog = fixture();

    let absent = CartStore::load(SharedCatalog(Arc::clone(&catalog)), ProductCache::new(), MemorySlot::new())
        .await
        .unwrap();
    assert!(absent.lines().is_empty());

    let corrupt = CartStore::load(
        SharedCatalog(Arc::clone(&catalog)),
        ProductCache::new(),
        MemorySlot::with_payload("{\"not\": \"a cart\""),
    )
    .await
    .unwrap();
    assert!(corrupt.lines().is_empty());
    assert_eq!(corrupt.total(), Decimal::ZERO);
}

#[tokio::test]
async fn trending_and_grid_share_one_session_cache() {
    let catalog = fixture();
    let cache = ProductCache::new();
    let browser = CatalogBrowser::new(SharedCatalog(Arc::clone(&catalog)), cache.clone());

    let trending = browser.trending().await.unwrap();
    let ids: Vec<i64> = trending.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(ids, vec![2, 3, 1]);

    // Trending seeds the cache with the full list, not just the top three.
    assert!(cache.lookup(ProductId::new(4)).await.is_some());

    // The detail path therefore never re-fetches.
    let detail = product_detail(&SharedCatalog(Arc::clone(&catalog)), &cache, ProductId::new(4))
        .await
        .unwrap();
    assert_eq!(detail.title, "Monitor");
    assert_eq!(catalog.get_by_id_calls.load(Ordering::SeqCst), 0);
}
