//! Application State
//!
//! This module holds the state shared across request handlers: the resolved
//! configuration, the catalog client, and the single-slot session registry.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::mcp::session::SessionRegistry;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state
pub struct AppState {
    /// Resolved process configuration
    pub config: Config,

    /// Read-only Shopify catalog client
    pub catalog: CatalogClient,

    /// The single active SSE session, if any
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Creates state with a catalog client pointed at the configured store.
    pub fn new(config: Config) -> Self {
        let catalog = CatalogClient::from_config(&config);
        Self::with_catalog(config, catalog)
    }

    /// Creates state with an explicit catalog client, so tests can aim it at
    /// a local stub server.
    pub fn with_catalog(config: Config, catalog: CatalogClient) -> Self {
        Self {
            config,
            catalog,
            sessions: SessionRegistry::new(),
        }
    }
}
