//! Presentation view-models.
//!
//! Pure functions of cart and catalog data to renderable views; the only
//! side effect is the detail view's fall-through fetch when the product is
//! not cached yet. No state lives here.

use rust_decimal::Decimal;

use vitrine_core::ProductId;

use crate::cart::CartLine;
use crate::catalog::{Catalog, CatalogError, Product, ProductCache};

/// Maximum card title length before truncation.
const TITLE_MAX_CHARS: usize = 40;

/// Stars in a full rating strip.
const STAR_SCALE: usize = 5;

/// Product card data for the grid and trending views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: ProductId,
    /// Title truncated to card width.
    pub title: String,
    pub category: String,
    pub price: String,
    /// Filled/empty star strip, e.g. `"★★★★☆"`.
    pub stars: String,
    pub rating_count: i64,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: truncate_title(&product.title),
            category: product.category.clone(),
            price: format_price(product.price),
            stars: stars(product.rating.rate),
            rating_count: product.rating.count,
            image: product.image.clone(),
        }
    }
}

/// Full product data for the detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetailView {
    pub id: ProductId,
    /// Untruncated title.
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub stars: String,
    pub rate: f64,
    pub rating_count: i64,
    pub image: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            stars: stars(product.rating.rate),
            rate: product.rating.rate,
            rating_count: product.rating.count,
            image: product.image.clone(),
        }
    }
}

/// Load the detail view for a product, preferring the in-session cache.
///
/// # Errors
///
/// Returns `CatalogError` if the product is neither cached nor fetchable.
pub async fn product_detail<C: Catalog>(
    catalog: &C,
    cache: &ProductCache,
    id: ProductId,
) -> Result<ProductDetailView, CatalogError> {
    if let Some(product) = cache.lookup(id).await {
        return Ok(ProductDetailView::from(&product));
    }
    let product = catalog.get_by_id(id).await?;
    cache.remember(std::slice::from_ref(&product)).await;
    Ok(ProductDetailView::from(&product))
}

// =============================================================================
// Cart Views
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id,
            title: line.product.title.clone(),
            quantity: line.quantity,
            price: format_price(line.product.price),
            line_price: format_price(line.subtotal()),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(Decimal::ZERO),
            item_count: 0,
        }
    }
}

impl From<&[CartLine]> for CartView {
    fn from(lines: &[CartLine]) -> Self {
        Self {
            items: lines.iter().map(CartItemView::from).collect(),
            subtotal: format_price(lines.iter().map(CartLine::subtotal).sum()),
            item_count: lines.iter().map(|line| line.quantity).sum(),
        }
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Format a decimal amount as a display price, e.g. `"$109.95"`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Render a star strip, rating rounded to the nearest whole star.
#[must_use]
pub fn stars(rate: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = (rate.round().clamp(0.0, 5.0)) as usize;
    "★".repeat(filled) + &"☆".repeat(STAR_SCALE - filled)
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_MAX_CHARS {
        let cut: String = title.chars().take(TITLE_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}
