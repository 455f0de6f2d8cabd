//! Shopify Catalog Domain Module
//!
//! This module contains the read-only product catalog integration, including:
//! - Domain models (Product, Shopify wire shapes)
//! - The HTTP client issuing the two catalog queries

pub mod client;
pub mod models;

// Re-export commonly used types for convenience
pub use client::{CatalogClient, CatalogError};
pub use models::Product;
