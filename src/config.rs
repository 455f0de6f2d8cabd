//! Process Configuration
//!
//! This module resolves the environment surface consumed by the server:
//! Shopify credentials, API version, MCP protocol version, and listen port.
//! Missing credentials are a fatal startup error; the server refuses to run
//! in a degraded state.

use thiserror::Error;

/// Default Shopify Admin API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2025-04";
/// Default MCP protocol version advertised during `initialize`.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Errors raised while resolving configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shopify store domain, e.g. `my-store.myshopify.com`.
    pub store_domain: String,

    /// Shopify Admin API access token.
    pub access_token: String,

    /// Shopify Admin API version segment of the catalog endpoint.
    pub api_version: String,

    /// MCP protocol version advertised to clients.
    pub protocol_version: String,

    /// TCP port the server listens on.
    pub port: u16,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// `SHOPIFY_ACCESS_TOKEN` and `SHOPIFY_STORE_DOMAIN` are required; the
    /// remaining variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store_domain: require("SHOPIFY_STORE_DOMAIN")?,
            access_token: require("SHOPIFY_ACCESS_TOKEN")?,
            api_version: env_or("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            protocol_version: env_or("MCP_PROTOCOL_VERSION", DEFAULT_PROTOCOL_VERSION),
            port: port_from_env()?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn port_from_env() -> Result<u16, ConfigError> {
    match std::env::var("PORT") {
        Err(_) => Ok(DEFAULT_PORT),
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
            name: "PORT",
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so everything runs in a
    // single test to avoid interference between parallel tests.
    #[test]
    fn test_from_env() {
        std::env::remove_var("SHOPIFY_STORE_DOMAIN");
        std::env::set_var("SHOPIFY_ACCESS_TOKEN", "shpat_test");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVar("SHOPIFY_STORE_DOMAIN"))
        ));

        std::env::set_var("SHOPIFY_STORE_DOMAIN", "test-store.myshopify.com");
        std::env::remove_var("SHOPIFY_API_VERSION");
        std::env::remove_var("MCP_PROTOCOL_VERSION");
        std::env::remove_var("PORT");

        let config = Config::from_env().expect("config should resolve");
        assert_eq!(config.store_domain, "test-store.myshopify.com");
        assert_eq!(config.access_token, "shpat_test");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.protocol_version, DEFAULT_PROTOCOL_VERSION);
        assert_eq!(config.port, DEFAULT_PORT);

        std::env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidVar { name: "PORT", .. })
        ));
        std::env::remove_var("PORT");
    }
}
