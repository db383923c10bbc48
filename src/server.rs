//! MCP server over stdio.
//!
//! Reads one JSON-RPC 2.0 message per line from stdin and writes one response
//! per line to stdout. Requests are handled one at a time.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::client::NotionClient;
use crate::error::{McpError, Result};
use crate::tools::ToolRegistry;

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported in `initialize`.
pub const SERVER_NAME: &str = "notion-mcp";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

/// An incoming JSON-RPC message. Notifications have no `id`; an explicit
/// `"id": null` is kept as `Some(Null)` by [`McpServer::handle_line`].
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Must be "2.0"
    pub jsonrpc: String,
    /// Request id; absent for notifications
    #[serde(default)]
    pub id: Option<JsonValue>,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default)]
    pub params: Option<JsonValue>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,
    /// Human-readable message
    pub message: String,
}

/// An outgoing JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    /// Always "2.0"
    pub jsonrpc: &'static str,
    /// Echoed request id
    pub id: JsonValue,
    /// Success payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    /// Failure payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: JsonValue, result: JsonValue) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: JsonValue, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// MCP server bound to one Notion client and a fixed tool registry.
pub struct McpServer {
    client: NotionClient,
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a server.
    pub fn new(client: NotionClient, registry: ToolRegistry) -> Self {
        Self { client, registry }
    }

    /// The registered tools.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!(tools = self.registry.tools().len(), "MCP server ready on stdio");

        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                stdout.write_all(response.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw line. Returns the serialized response, if any.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value = match serde_json::from_str::<JsonValue>(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                let response = JsonRpcResponse::error(
                    JsonValue::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                );
                return Self::serialize(&response);
            }
        };

        // serde folds `"id": null` into `None`; read it off the raw object instead.
        let id = value.get("id").cloned();
        let response = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(mut request) => {
                request.id = id;
                self.handle_request(request).await?
            }
            Err(e) => {
                warn!(error = %e, "invalid request");
                JsonRpcResponse::error(
                    id.unwrap_or(JsonValue::Null),
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                )
            }
        };

        Self::serialize(&response)
    }

    fn serialize(response: &JsonRpcResponse) -> Option<String> {
        match serde_json::to_string(response) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "failed to serialize response");
                None
            }
        }
    }

    /// Handle a parsed request. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification");
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                "jsonrpc must be '2.0'",
            ));
        }

        debug!(method = %request.method, "request");
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_payload()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": self.registry.tools() })),
            "tools/call" => match self.handle_tools_call(request.params).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(McpError::UnknownTool(name)) => {
                    JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {}", name))
                }
                Err(e @ (McpError::MissingArg(_) | McpError::InvalidArg { .. })) => {
                    JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())
                }
                Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    fn initialize_payload(&self) -> JsonValue {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    async fn handle_tools_call(&self, params: Option<JsonValue>) -> Result<JsonValue> {
        let params = match params {
            Some(JsonValue::Object(map)) => map,
            _ => return Err(McpError::MissingArg("params".to_string())),
        };

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::MissingArg("name".to_string()))?;

        let args = match params.get("arguments") {
            Some(JsonValue::Object(map)) => map.clone(),
            Some(JsonValue::Null) | None => Map::new(),
            Some(_) => {
                return Err(McpError::InvalidArg {
                    name: "arguments".to_string(),
                    reason: "Expected an object".to_string(),
                })
            }
        };

        let result = self.registry.call(&self.client, name, args).await?;
        Ok(serde_json::to_value(result)?)
    }
}
