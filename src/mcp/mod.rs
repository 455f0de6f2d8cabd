//! Model Context Protocol (MCP) Module
//!
//! This module contains the MCP protocol implementation, including:
//! - Protocol models (JsonRpcRequest, constants, tool errors)
//! - RPC helpers (success/error envelopes, SSE event construction)
//! - The fixed tool registry and its argument validation
//! - The single-slot session registry behind the SSE transport
//! - Route handlers for `/sse` and `/messages` plus request dispatch

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod registry;
pub mod session;

// Re-export commonly used types and functions
pub use handlers::routes;
