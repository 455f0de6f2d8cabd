use shopify_mcp_rust::config::Config;
use shopify_mcp_rust::router::create_app_router;
use shopify_mcp_rust::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env if present (dev only)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopify_mcp_rust=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing Shopify credentials are fatal; refuse to start degraded.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };

    let port = config.port;
    let state = Arc::new(AppState::new(config));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("MCP server running at http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use shopify_mcp_rust::config::Config;
    use shopify_mcp_rust::mcp::handlers::dispatch;
    use shopify_mcp_rust::mcp::models::JsonRpcRequest;
    use shopify_mcp_rust::state::AppState;

    fn test_state() -> AppState {
        AppState::new(Config {
            store_domain: "test-store.myshopify.com".into(),
            access_token: "shpat_test".into(),
            api_version: "2025-04".into(),
            protocol_version: "2024-11-05".into(),
            port: 0,
        })
    }

    fn request(method: &str, params: Option<Value>, id: i64) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: Some("2.0".into()),
            method: method.into(),
            params,
            id: Some(json!(id)),
        }
    }

    #[tokio::test]
    async fn test_dispatch_tools_list() {
        let state = test_state();

        let response = dispatch(&state, request("tools/list", None, 1))
            .await
            .expect("tools/list must produce a response");

        assert_eq!(response["id"], 1);
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "search_products");
        assert_eq!(tools[1]["name"], "recommend_products");
        assert_eq!(
            tools[0]["inputSchema"]["required"],
            json!(["keyword"])
        );
    }

    #[tokio::test]
    async fn test_dispatch_initialize_and_ping() {
        let state = test_state();

        let init = dispatch(&state, request("initialize", None, 2))
            .await
            .unwrap();
        assert_eq!(init["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(init["result"]["serverInfo"]["name"], "shopify-mcp-server");

        let pong = dispatch(&state, request("ping", None, 3)).await.unwrap();
        assert_eq!(pong["result"], json!({}));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_method() {
        let state = test_state();

        let response = dispatch(&state, request("bogus/method", None, 4))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["error"]["message"], "Method not found");
    }

    #[tokio::test]
    async fn test_dispatch_notification_gets_no_response() {
        let state = test_state();

        let notification = JsonRpcRequest {
            jsonrpc: Some("2.0".into()),
            method: "notifications/initialized".into(),
            params: None,
            id: None,
        };
        assert!(dispatch(&state, notification).await.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_never_reaches_catalog() {
        let state = test_state();

        // The catalog client points at a real domain here; an unknown tool
        // must fail before any network call is attempted.
        let response = dispatch(
            &state,
            request(
                "tools/call",
                Some(json!({ "name": "unknown_tool", "arguments": {} })),
                5,
            ),
        )
        .await
        .unwrap();

        assert_eq!(response["error"]["code"], -32602);
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_dispatch_missing_keyword_never_reaches_catalog() {
        let state = test_state();

        let response = dispatch(
            &state,
            request(
                "tools/call",
                Some(json!({ "name": "search_products", "arguments": {} })),
                6,
            ),
        )
        .await
        .unwrap();

        assert_eq!(response["error"]["code"], -32602);
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("keyword"));
    }
}
