//! JSON-RPC protocol types for tool provider communication.
//!
//! Tool providers speak the Model Context Protocol over stdio: one JSON-RPC
//! 2.0 message per line on the child's stdin/stdout.
//!
//! # Protocol Overview
//!
//! - **Requests**: Client → provider (`initialize`, `tools/list`, `tools/call`)
//! - **Notifications**: Client → provider (`notifications/initialized`) and
//!   provider → client (logging, progress), no response expected
//! - **Responses**: provider → client (result or error)

use serde::{Deserialize, Serialize};
use squadron_domain::ToolArgs;
use std::sync::atomic::{AtomicU64, Ordering};

/// Protocol revision sent in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Global request ID counter for JSON-RPC requests.
static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Generates a unique request ID.
fn next_id() -> u64 {
    REQUEST_ID.fetch_add(1, Ordering::SeqCst)
}

/// JSON-RPC request
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC request with an auto-generated ID.
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: next_id(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC notification (no id, no response)
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: &'static str,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcNotification {
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// JSON-RPC response sent back for a provider-initiated request.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponseOut {
    pub jsonrpc: &'static str,
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponseOut {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn method_not_found(id: serde_json::Value, method: &str) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code: -32601,
                message: format!("Method not found: {}", method),
                data: None,
            }),
        }
    }
}

/// Classification of an incoming JSON-RPC message.
#[derive(Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// A response to a request we sent (has `id`, no `method`).
    Response,
    /// A request from the provider (has `id` + `method`), e.g. `ping`.
    IncomingRequest,
    /// A notification (has `method`, no `id`), e.g. `notifications/message`.
    Notification,
}

/// Classify a JSON-RPC message by inspecting `id` and `method` fields.
pub fn classify_message(json: &serde_json::Value) -> MessageKind {
    let has_id = json.get("id").is_some_and(|v| !v.is_null());
    let has_method = json.get("method").and_then(|v| v.as_str()).is_some();

    match (has_id, has_method) {
        (true, true) => MessageKind::IncomingRequest,
        (true, false) => MessageKind::Response,
        _ => MessageKind::Notification,
    }
}

/// `initialize` parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: &'static str,
    pub capabilities: serde_json::Value,
    pub client_info: ClientInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl Default for InitializeParams {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            capabilities: serde_json::json!({}),
            client_info: ClientInfo {
                name: "squadron",
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// A tool advertised by a provider in `tools/list`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_schema: Option<serde_json::Value>,
}

/// `tools/list` result page
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsResult {
    #[serde(default)]
    pub tools: Vec<McpTool>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// `tools/call` parameters
#[derive(Debug, Clone, Serialize)]
pub struct CallToolParams<'a> {
    pub name: &'a str,
    pub arguments: &'a ToolArgs,
}

/// `tools/call` result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    #[serde(default)]
    pub content: Vec<serde_json::Value>,
    #[serde(default)]
    pub is_error: bool,
}

impl CallToolResult {
    /// Join content blocks with newlines: text blocks verbatim, others as JSON.
    pub fn render_text(&self) -> String {
        self.content
            .iter()
            .map(|block| {
                let is_text = block.get("type").and_then(|t| t.as_str()) == Some("text");
                match block.get("text").and_then(|t| t.as_str()) {
                    Some(text) if is_text => text.to_string(),
                    _ => block.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = JsonRpcRequest::new("tools/list", None);
        let text = serde_json::to_string(&request).unwrap();
        assert!(text.starts_with(&format!("{{\"jsonrpc\":\"2.0\",\"id\":{},", request.id)));
        assert!(!text.contains("params"));

        let next = JsonRpcRequest::new("tools/list", None);
        assert!(next.id > request.id);
    }

    #[test]
    fn test_initialize_params_shape() {
        let value = serde_json::to_value(InitializeParams::default()).unwrap();
        assert_eq!(value["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(value["clientInfo"]["name"], "squadron");
        assert!(value["capabilities"].is_object());
    }

    #[test]
    fn classify_response() {
        assert_eq!(
            classify_message(&json!({"id": 1, "result": {}})),
            MessageKind::Response
        );
    }

    #[test]
    fn classify_incoming_request() {
        assert_eq!(
            classify_message(&json!({"id": "abc", "method": "ping"})),
            MessageKind::IncomingRequest
        );
    }

    #[test]
    fn classify_notification() {
        assert_eq!(
            classify_message(&json!({"method": "notifications/message", "params": {}})),
            MessageKind::Notification
        );
        assert_eq!(
            classify_message(&json!({"id": null, "method": "x"})),
            MessageKind::Notification
        );
    }

    #[test]
    fn test_list_tools_result() {
        let result: ListToolsResult = serde_json::from_value(json!({
            "tools": [
                {"name": "read", "description": "Read a file", "inputSchema": {"type": "object"}},
                {"name": "bare"}
            ],
            "nextCursor": "2"
        }))
        .unwrap();
        assert_eq!(result.tools.len(), 2);
        assert_eq!(result.tools[0].input_schema, Some(json!({"type": "object"})));
        assert!(result.tools[1].description.is_none());
        assert_eq!(result.next_cursor.as_deref(), Some("2"));
    }

    #[test]
    fn test_render_text_joins_blocks() {
        let result: CallToolResult = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "line one"},
                {"type": "image", "data": "AAAA", "mimeType": "image/png"},
                {"type": "text", "text": "line two"}
            ]
        }))
        .unwrap();
        assert!(!result.is_error);
        assert_eq!(
            result.render_text(),
            "line one\n{\"data\":\"AAAA\",\"mimeType\":\"image/png\",\"type\":\"image\"}\nline two"
        );
    }
}
