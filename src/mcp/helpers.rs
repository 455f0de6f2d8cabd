//! Helper utilities for the MCP protocol surface
//!
//! This module houses small, pure functions used across the protocol layer:
//! JSON-RPC envelope construction, SSE event framing, and tool result
//! wrapping. Keeping them separated from the handlers makes the protocol
//! encoding easy to test in isolation.

use axum::response::sse::Event;
use serde_json::{json, Value};

use super::models::MESSAGES_PATH;

/// JSON-RPC error code for malformed request bodies.
pub const PARSE_ERROR: i32 = -32700;
/// JSON-RPC error code for unknown methods.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC error code for invalid call parameters (unknown tool, bad args).
pub const INVALID_PARAMS: i32 = -32602;

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` - The request identifier that must be echoed back.
/// * `result` - The payload representing the successful outcome.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` - The request identifier (or `null` if unavailable).
/// * `code` - The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` - Human-readable description of the error.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

/// Wraps a tool outcome as an MCP tool result.
///
/// Upstream failures are delivered through this same shape with
/// `is_error` set, so callers must inspect the flag rather than rely on a
/// transport-level failure.
pub fn tool_result(text: impl Into<String>, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text.into() }],
        "isError": is_error,
    })
}

/// First frame of every stream: tells the client where to post requests.
pub fn endpoint_event() -> Event {
    Event::default().event("endpoint").data(MESSAGES_PATH)
}

/// Frames a response envelope as an SSE `message` event.
pub fn message_event(payload: &Value) -> Event {
    Event::default().event("message").data(payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_envelopes() {
        let success = rpc_success(json!(1), json!("ok"));
        assert_eq!(success["result"], "ok");
        assert_eq!(success["id"], 1);
        assert_eq!(success["jsonrpc"], "2.0");

        let error = rpc_error(json!(2), METHOD_NOT_FOUND, "fail");
        assert_eq!(error["error"]["code"], -32601);
        assert_eq!(error["error"]["message"], "fail");
        assert_eq!(error["id"], 2);
    }

    #[test]
    fn test_tool_result_shape() {
        let result = tool_result("[]", false);
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "[]");
        assert_eq!(result["isError"], false);

        let failure = tool_result("boom", true);
        assert_eq!(failure["isError"], true);
    }
}
