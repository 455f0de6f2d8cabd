//! Routing module for the MCP server

use axum::routing::get;
use axum::{body::Body, extract::Request, middleware::Next, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::state::SharedState;

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let res = next.run(req).await;
        if res.status().is_client_error() || res.status().is_server_error() {
            tracing::warn!(%method, %uri, status = %res.status(), "request failed");
        } else {
            tracing::debug!(%method, %uri, status = %res.status(), "request");
        }
        res
    });

    // Middleware: CORS (permissive; the server carries no caller auth)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .route("/healthz", get(healthz))
        .merge(crate::mcp::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}

/// Endpoint: GET /healthz
/// Liveness probe for monitoring.
async fn healthz() -> &'static str {
    "OK"
}
