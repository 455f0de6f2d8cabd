//! MCP route handlers and request dispatch
//!
//! This module wires the two transport endpoints together: `GET /sse` opens
//! the long-lived stream and registers it as the sole active session, and
//! `POST /messages` feeds decoded request envelopes into `dispatch`, whose
//! responses travel back over the open stream rather than the HTTP side
//! channel. `dispatch` and `handle_tool_call` are exported for tests.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::helpers::{
    endpoint_event, message_event, rpc_error, rpc_success, tool_result, INVALID_PARAMS,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use super::models::{JsonRpcRequest, ToolError, MESSAGES_PATH, SERVER_NAME, SERVER_VERSION, SSE_PATH};
use super::registry;
use super::session::{Session, SessionStream};
use crate::config::Config;
use crate::state::{AppState, SharedState};

/// Creates routes for the MCP transport endpoints
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route(SSE_PATH, get(handle_sse))
        .route(MESSAGES_PATH, post(handle_messages))
}

/// Endpoint: GET /sse
///
/// Opens the long-lived event stream. The new session replaces any previous
/// one; the first frame is the `endpoint` handshake event pointing the client
/// at the side channel.
async fn handle_sse(State(state): State<SharedState>) -> Sse<SessionStream> {
    let (session, rx) = Session::open();
    let session_id = session.id();

    session.send(endpoint_event());
    state.sessions.set(session);
    tracing::info!(%session_id, "SSE stream opened");

    Sse::new(SessionStream::new(session_id, rx, state)).keep_alive(KeepAlive::default())
}

/// Endpoint: POST /messages
///
/// Side channel for client-originated envelopes. The HTTP response is only
/// the channel's acknowledgement; the actual result is delivered over the
/// open stream.
async fn handle_messages(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> Response {
    let Some(session) = state.sessions.get() else {
        return (StatusCode::BAD_REQUEST, "No active SSE client").into_response();
    };

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("rejected side-channel payload: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    tracing::debug!(method = %request.method, "MCP request received");

    if let Some(response) = dispatch(&state, request).await {
        if !session.send(message_event(&response)) {
            // The stream went away mid-flight; the result is dropped.
            state.sessions.clear_if(session.id());
            tracing::debug!(session_id = %session.id(), "discarded response for closed stream");
        }
    }

    (StatusCode::ACCEPTED, "Accepted").into_response()
}

// =============================================================================
// Dispatch
// =============================================================================

/// Routes a decoded request envelope to its handler and encodes the outcome.
///
/// Returns `None` for notifications, which receive no response. Every
/// per-request failure is converted into a protocol-shaped envelope here;
/// nothing a single request does can terminate the stream or the process.
pub async fn dispatch(state: &AppState, request: JsonRpcRequest) -> Option<Value> {
    let id = request.id.unwrap_or(Value::Null);
    let params = request.params.unwrap_or(Value::Null);

    let response = match request.method.as_str() {
        "initialize" => rpc_success(id, initialize_result(&state.config)),
        "notifications/initialized" => return None,
        "ping" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, json!({ "tools": registry::tools() })),
        "tools/call" => match handle_tool_call(state, &params).await {
            Ok(result) => rpc_success(id, result),
            Err(err) => rpc_error(id, INVALID_PARAMS, err.to_string()),
        },
        other => {
            tracing::warn!(method = other, "unknown MCP method");
            rpc_error(id, METHOD_NOT_FOUND, "Method not found")
        }
    };

    Some(response)
}

/// Handles `initialize` request (handshake).
fn initialize_result(config: &Config) -> Value {
    json!({
        "protocolVersion": config.protocol_version,
        "capabilities": {
            "tools": {},
            "experimental": {},
            "prompts": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false },
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
        }
    })
}

/// Handles `tools/call` request (business logic).
///
/// An unknown tool or missing argument is terminal and never reaches the
/// catalog. A catalog failure is not a protocol error: it comes back as a
/// tool result with `isError` set, delivered over the stream like any other.
pub async fn handle_tool_call(state: &AppState, params: &Value) -> Result<Value, ToolError> {
    let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
    let descriptor =
        registry::find(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));
    descriptor.validate_arguments(&arguments)?;

    let outcome = match descriptor.name {
        registry::SEARCH_TOOL_NAME => {
            let keyword = arguments
                .get("keyword")
                .and_then(Value::as_str)
                .unwrap_or_default();
            state.catalog.search_products(keyword).await
        }
        _ => state.catalog.recommend_products().await,
    };

    Ok(match outcome {
        Ok(products) => {
            let payload =
                serde_json::to_string_pretty(&products).unwrap_or_else(|_| "[]".to_string());
            tool_result(payload, false)
        }
        Err(err) => {
            tracing::warn!(tool = descriptor.name, error = %err, "catalog request failed");
            tool_result(format!("Catalog request failed: {err}"), true)
        }
    })
}
