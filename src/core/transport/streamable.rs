//! Streamable-HTTP transport adapter (direct request/response).
//!
//! Each `POST /mcp` carries one JSON-RPC message or batch and receives the
//! reply in the HTTP response body. Payloads made only of notifications are
//! acknowledged with `202 Accepted` and an empty body.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
    routing::{MethodRouter, post},
};
use bytes::Bytes;
use http::{Method, StatusCode};
use tracing::{debug, instrument};

use super::http::{AppState, method_not_allowed};
use super::jsonrpc;

/// Mount point of the direct-request endpoint.
pub const MCP_PATH: &str = "/mcp";

/// Every method on `/mcp`: POST is handled, anything else is refused here.
pub fn routes() -> MethodRouter<AppState> {
    post(handle_post).fallback(|method: Method| async move { method_not_allowed(&method, "POST") })
}

/// `POST /mcp` - handle a JSON-RPC payload and answer in the response body.
#[instrument(skip_all)]
pub async fn handle_post(State(state): State<AppState>, body: Bytes) -> Response {
    let payload = match jsonrpc::parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return (StatusCode::BAD_REQUEST, Json(response)).into_response(),
    };

    match jsonrpc::handle_payload(&state.server, payload) {
        Some(reply) => (StatusCode::OK, Json(reply)).into_response(),
        None => {
            debug!("Nothing to reply, acknowledging");
            StatusCode::ACCEPTED.into_response()
        }
    }
}
