//! JSON-RPC 2.0 message handling shared by the HTTP transports.
//!
//! Both the SSE adapter and the streamable-HTTP adapter parse the same MCP
//! messages; only the way replies travel back differs.

use rmcp::ServerHandler;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::core::McpServer;
use crate::domains::tools::ToolError;

pub use crate::domains::tools::{INTERNAL_ERROR, INVALID_PARAMS};

/// Protocol versions this server can speak, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// `None` when the member is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// The reply to one HTTP payload: a single response or a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JsonRpcReply {
    Single(JsonRpcResponse),
    Batch(Vec<JsonRpcResponse>),
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parameters of a `tools/call` request.
#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, PARSE_ERROR, msg)
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, INVALID_REQUEST, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, INVALID_PARAMS, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, INTERNAL_ERROR, msg)
    }

    /// Error response for a failed tool call.
    pub fn tool_error(id: Option<Value>, err: &ToolError) -> Self {
        let mut response = Self::error(id, err.rpc_code(), err.to_string());
        if let Some(error) = response.error.as_mut() {
            error.data = err.rpc_data();
        }
        response
    }
}

/// Pick the protocol version to answer `initialize` with.
///
/// The client's version is echoed when supported, otherwise the newest one
/// this server knows is offered.
pub fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|v| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|s| **s == v))
        .copied()
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
}

/// Decode an HTTP body into a JSON value.
///
/// On failure the JSON-RPC parse error to send back is returned.
pub fn parse_payload(body: &[u8]) -> Result<Value, JsonRpcResponse> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Unparseable JSON-RPC payload: {}", e);
        JsonRpcResponse::parse_error(format!("Parse error: {}", e))
    })
}

/// Handle a decoded payload: a single message or a batch.
///
/// Returns `None` when nothing needs to be sent back (notifications and
/// client responses only).
pub fn handle_payload(server: &McpServer, payload: Value) -> Option<JsonRpcReply> {
    match payload {
        Value::Array(items) if items.is_empty() => {
            Some(JsonRpcReply::Single(JsonRpcResponse::invalid_request(None)))
        }
        Value::Array(items) => {
            let responses: Vec<_> = items
                .into_iter()
                .filter_map(|item| handle_message(server, item))
                .collect();
            (!responses.is_empty()).then_some(JsonRpcReply::Batch(responses))
        }
        other => handle_message(server, other).map(JsonRpcReply::Single),
    }
}

/// Handle one JSON-RPC message.
fn handle_message(server: &McpServer, message: Value) -> Option<JsonRpcResponse> {
    // Responses from the client to server-initiated requests carry no method.
    if message.get("method").is_none()
        && (message.get("result").is_some() || message.get("error").is_some())
    {
        debug!("Ignoring client response");
        return None;
    }

    let id = message.get("id").cloned();
    match serde_json::from_value::<JsonRpcRequest>(message) {
        Ok(request) => process_request(server, request),
        Err(e) => {
            warn!("Malformed JSON-RPC message: {}", e);
            Some(JsonRpcResponse::invalid_request(id))
        }
    }
}

/// Process a JSON-RPC request and return the response, if one is due.
#[instrument(skip_all, fields(method = %request.method))]
pub fn process_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    // A null id is neither a request nor a notification
    if matches!(request.id, Some(Value::Null)) {
        warn!("Rejecting {} with a null id", request.method);
        return Some(JsonRpcResponse::invalid_request(None));
    }

    // Notifications get no response
    if request.id.is_none() || request.method.starts_with("notifications/") {
        handle_notification(&request);
        return None;
    }

    info!("Received JSON-RPC request: {}", request.method);

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(server, request),
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
        "tools/list" => handle_tools_list(server, request),
        "tools/call" => handle_tools_call(server, request),
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id, &request.method)
        }
    };

    Some(response)
}

/// Handle initialize request.
fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let requested = request
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str);
    let version = negotiate_protocol_version(requested);
    info!("Initializing session with protocol version {}", version);

    match serde_json::to_value(server.get_info()) {
        Ok(mut result) => {
            if let Some(fields) = result.as_object_mut() {
                fields.insert("protocolVersion".to_string(), Value::from(version));
            }
            JsonRpcResponse::success(request.id, result)
        }
        Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
    }
}

/// Handle tools/list request.
fn handle_tools_list(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let tools = server.list_tools();
    JsonRpcResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle tools/call request.
fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = request.params else {
        return JsonRpcResponse::invalid_params(request.id, "Missing params");
    };

    let params: CallToolParams = match serde_json::from_value(params) {
        Ok(p) => p,
        Err(e) => {
            return JsonRpcResponse::invalid_params(request.id, format!("Invalid params: {}", e));
        }
    };

    let arguments = params.arguments.unwrap_or(Value::Null);

    match server.call_tool(&params.name, arguments) {
        Ok(result) => JsonRpcResponse::success(
            request.id,
            serde_json::json!({
                "content": result.content,
                "isError": result.is_error.unwrap_or(false)
            }),
        ),
        Err(e) => JsonRpcResponse::tool_error(request.id, &e),
    }
}

/// Handle notifications (no response needed).
fn handle_notification(request: &JsonRpcRequest) {
    match request.method.as_str() {
        "notifications/initialized" => info!("Client sent initialized notification"),
        _ => debug!("Received notification: {}", request.method),
    }
}
