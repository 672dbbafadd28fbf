//! Domain types for the remote product catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vitrine_core::ProductId;

/// A product as served by the remote catalog.
///
/// Immutable once fetched; the remote catalog is the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price. The catalog emits a JSON number, so this field goes
    /// through the float codec; arithmetic stays exact decimal afterwards.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Long-form description.
    pub description: String,
    /// Category name, e.g. "electronics".
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Aggregate customer rating.
    pub rating: Rating,
}

/// Aggregate rating for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating on a 1-5 scale.
    pub rate: f64,
    /// Number of ratings behind the average.
    pub count: i64,
}
