//! Shopify Catalog Client
//!
//! This module issues the two read queries against the Shopify Admin REST
//! products endpoint and normalizes each row into a [`Product`]. One outbound
//! request per invocation; no caching and no retry, so a transient upstream
//! failure propagates as a [`CatalogError`] on that call.

use reqwest::StatusCode;
use thiserror::Error;

use super::models::{Product, ProductsPayload};
use crate::config::Config;

/// Header carrying the Shopify Admin API credential.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Maximum number of products returned per query.
pub const RESULT_LIMIT: u8 = 5;

/// Errors raised by catalog queries.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("catalog returned status {0}")]
    Status(StatusCode),

    #[error("catalog returned a malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Read-only client for the Shopify Admin products listing.
pub struct CatalogClient {
    http: reqwest::Client,
    products_url: String,
    access_token: String,
}

impl CatalogClient {
    /// Creates a client against the given catalog base URL.
    ///
    /// The base URL is separate from [`Config::store_domain`] so tests can
    /// point the client at a local stub server.
    pub fn new(base_url: &str, api_version: &str, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            products_url: format!(
                "{}/admin/api/{}/products.json",
                base_url.trim_end_matches('/'),
                api_version
            ),
            access_token: access_token.into(),
        }
    }

    /// Creates a client against the configured store domain.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &format!("https://{}", config.store_domain),
            &config.api_version,
            config.access_token.clone(),
        )
    }

    /// Searches the catalog for products whose title matches `keyword`.
    ///
    /// Results are capped at [`RESULT_LIMIT`] and kept in catalog order.
    pub async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, CatalogError> {
        self.fetch(&[
            ("title", keyword.to_string()),
            ("limit", RESULT_LIMIT.to_string()),
        ])
        .await
    }

    /// Fetches the top products under the catalog's best-selling ordering.
    pub async fn recommend_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch(&[
            ("limit", RESULT_LIMIT.to_string()),
            ("order", "best-selling".to_string()),
        ])
        .await
    }

    async fn fetch(&self, params: &[(&str, String)]) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .http
            .get(&self.products_url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.bytes().await?;
        let payload: ProductsPayload =
            serde_json::from_slice(&body).map_err(CatalogError::Decode)?;

        Ok(payload
            .products
            .unwrap_or_default()
            .into_iter()
            .map(Product::from)
            .collect())
    }
}
