//! HTTP transport implementation.
//!
//! One axum server hosts both MCP HTTP transports:
//! - `/sse` and `/sse/message`: the SSE adapter (see [`super::sse`])
//! - `/mcp`: the streamable-HTTP adapter (see [`super::streamable`])
//!
//! Every other path answers `404 Not found`.

use std::time::Duration;

use axum::{
    Router,
    response::{IntoResponse, Response},
};
use http::{Method, StatusCode, header};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

use super::sse::{self, SSE_MESSAGE_PATH, SSE_PATH, SseSessions};
use super::streamable::{self, MCP_PATH};
use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    pub(super) server: McpServer,
    /// Open SSE sessions.
    pub(super) sessions: SseSessions,
    /// Keep-alive interval for SSE streams.
    pub(super) keep_alive: Duration,
}

impl AppState {
    /// Create the state for `server` with the given SSE keep-alive interval.
    pub fn new(server: McpServer, keep_alive_secs: u64) -> Self {
        Self {
            server,
            sessions: SseSessions::new(),
            keep_alive: sse::keep_alive_interval(keep_alive_secs),
        }
    }

    /// The open SSE sessions.
    pub fn sessions(&self) -> &SseSessions {
        &self.sessions
    }
}

/// Build the request router.
///
/// Each mounted path hands every method to its adapter; the adapter decides
/// which methods it serves.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(SSE_PATH, sse::stream_routes())
        .route(SSE_MESSAGE_PATH, sse::message_routes())
        .route(MCP_PATH, streamable::routes())
        .fallback(not_found)
        .with_state(state)
}

/// Fallback for every unmounted path.
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Adapter answer for a method it does not serve.
pub(super) fn method_not_allowed(method: &Method, allow: &'static str) -> Response {
    debug!("Refusing {} (allowed: {})", method, allow);
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, allow)],
        "Method not allowed",
    )
        .into_response()
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let state = AppState::new(server, self.config.sse_keep_alive_secs);

        let mut app = build_router(state).layer(TraceLayer::new_for_http());

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → SSE:        GET {}  (messages: POST {})", SSE_PATH, SSE_MESSAGE_PATH);
        info!("  → Streamable: POST {}", MCP_PATH);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use axum::body::Body;
    use http::{Request, Response, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state() -> AppState {
        let server = McpServer::new(Config::default()).unwrap();
        AppState::new(server, 15)
    }

    fn app() -> Router {
        build_router(state())
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn next_event(body: &mut Body) -> String {
        let frame = body.frame().await.unwrap().unwrap();
        let data = frame.into_data().unwrap();
        String::from_utf8(data.to_vec()).unwrap()
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        for path in ["/other", "/", "/mcp/extra", "/sse/other"] {
            let response = app().oneshot(get(path)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {}", path);
            assert_eq!(body_text(response).await, "Not found");
        }
    }

    #[tokio::test]
    async fn test_mcp_tools_call() {
        let response = app()
            .oneshot(post_json(
                "/mcp",
                json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "method": "tools/call",
                    "params": { "name": "add", "arguments": { "a": 2, "b": 40 } }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let reply: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(reply["id"], 1);
        assert_eq!(
            reply["result"]["content"],
            json!([{ "type": "text", "text": "42" }])
        );
    }

    #[tokio::test]
    async fn test_mcp_initialize() {
        let response = app()
            .oneshot(post_json(
                "/mcp",
                json!({
                    "jsonrpc": "2.0",
                    "id": "init",
                    "method": "initialize",
                    "params": { "protocolVersion": "2025-03-26", "capabilities": {} }
                }),
            ))
            .await
            .unwrap();
        let reply: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(reply["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(reply["result"]["serverInfo"]["name"], "Authless Calculator");
    }

    #[tokio::test]
    async fn test_mcp_notification_is_accepted() {
        let response = app()
            .oneshot(post_json(
                "/mcp",
                json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_mcp_null_id_is_answered() {
        let response = app()
            .oneshot(post_json(
                "/mcp",
                json!({
                    "jsonrpc": "2.0",
                    "id": null,
                    "method": "tools/call",
                    "params": { "name": "add", "arguments": { "a": 1, "b": 2 } }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let reply: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(reply["error"]["code"], -32600);
        assert!(reply["id"].is_null());
    }

    #[tokio::test]
    async fn test_mcp_parse_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .body(Body::from("{oops"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let reply: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(reply["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_mcp_other_methods_reach_adapter() {
        for method in ["GET", "DELETE", "PUT"] {
            let request = Request::builder()
                .method(method)
                .uri("/mcp")
                .body(Body::empty())
                .unwrap();
            let response = app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", method);
            assert_eq!(response.headers()[header::ALLOW], "POST");
            assert_eq!(body_text(response).await, "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_sse_roundtrip() {
        let state = state();
        let app = build_router(state.clone());

        let response = app.clone().oneshot(get("/sse")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/event-stream"));

        let mut body = response.into_body();
        let endpoint = next_event(&mut body).await;
        assert!(endpoint.contains("event: endpoint"));
        let uri = endpoint
            .lines()
            .find_map(|line| line.strip_prefix("data: "))
            .unwrap()
            .to_string();
        assert!(uri.starts_with("/sse/message?sessionId="));
        assert_eq!(state.sessions().len(), 1);

        let ack = app
            .clone()
            .oneshot(post_json(
                &uri,
                json!({
                    "jsonrpc": "2.0",
                    "id": 7,
                    "method": "tools/call",
                    "params": { "name": "list_assignments", "arguments": { "course_id": "eng301" } }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(ack.status(), StatusCode::ACCEPTED);

        let message = next_event(&mut body).await;
        assert!(message.contains("event: message"));
        let data = message
            .lines()
            .find_map(|line| line.strip_prefix("data: "))
            .unwrap();
        let reply: Value = serde_json::from_str(data).unwrap();
        assert_eq!(reply["id"], 7);
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("proj1") && text.contains("proj3"));

        drop(body);
        assert!(state.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_sse_message_without_session() {
        let ping = json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" });

        let response = app()
            .oneshot(post_json("/sse/message", ping.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app()
            .oneshot(post_json("/sse/message?sessionId=missing", ping))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Session not found");
    }

    #[tokio::test]
    async fn test_sse_wrong_methods() {
        let response = app()
            .oneshot(post_json("/sse", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");
        assert_eq!(body_text(response).await, "Method not allowed");

        let response = app().oneshot(get("/sse/message")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");
    }

    #[test]
    fn test_transport_address() {
        let transport = HttpTransport::new(HttpConfig {
            port: 9999,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        });
        assert_eq!(transport.address(), "0.0.0.0:9999");
    }
}
