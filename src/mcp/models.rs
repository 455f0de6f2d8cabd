//! MCP Protocol Models and Constants
//!
//! This module contains the data structures and constants related to the
//! Model Context Protocol (MCP) surface of the server.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// MCP Constants
// =============================================================================

/// Server identifier advertised during `initialize`
pub const SERVER_NAME: &str = "shopify-mcp-server";
/// Server version advertised during `initialize`
pub const SERVER_VERSION: &str = "1.0.0";
/// Path of the long-lived event stream endpoint
pub const SSE_PATH: &str = "/sse";
/// Path of the side channel clients post request envelopes to
pub const MESSAGES_PATH: &str = "/messages";

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier
    pub id: Option<Value>,
}

/// Terminal failures of a `tools/call` request.
///
/// Both variants surface as protocol-level error envelopes over the stream;
/// neither triggers a catalog call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
