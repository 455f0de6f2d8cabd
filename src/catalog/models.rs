//! Shopify Catalog Domain Models
//!
//! This module contains the compact product record served by the tools and
//! the wire shapes of the Shopify Admin products listing it is derived from.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product Record
// =============================================================================

/// Compact product record returned by the catalog tools.
///
/// `price` and `image` are optional: a product without variants carries no
/// price and a product without a primary image carries no image URL. Absent
/// fields are omitted from the serialized JSON entirely.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    /// Catalog identifier of the product
    pub id: u64,

    /// Product title as returned by the catalog
    pub title: String,

    /// Price of the first variant, as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// URL of the primary product image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// =============================================================================
// Shopify Wire Shapes
// =============================================================================

/// Body of the Shopify Admin products listing.
///
/// `products` is optional: a response without the field normalizes to an
/// empty listing rather than a decode failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductsPayload {
    #[serde(default)]
    pub products: Option<Vec<CatalogProduct>>,
}

/// A single product row as returned by the catalog.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogProduct {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub image: Option<ProductImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductVariant {
    #[serde(default)]
    pub price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductImage {
    #[serde(default)]
    pub src: Option<String>,
}

impl From<CatalogProduct> for Product {
    fn from(raw: CatalogProduct) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            price: raw.variants.into_iter().next().and_then(|v| v.price),
            image: raw.image.and_then(|i| i.src),
        }
    }
}
