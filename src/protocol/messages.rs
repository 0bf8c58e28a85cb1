//! JSON-RPC message types
//!
//! One request or response per line, JSON-RPC 2.0 framing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProtocolError, ToolCallError};
use crate::error::handlers::error_to_rpc_code;

pub const JSONRPC_VERSION: &str = "2.0";

/// Incoming JSON-RPC request or notification.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Requests without an id never get a response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Outgoing JSON-RPC response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, err: &ProtocolError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: error_to_rpc_code(err),
                message: err.to_string(),
            }),
        }
    }

    /// Serialize as a single newline-terminated line
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// A line that could not be turned into a request, with whatever id it carried.
#[derive(Debug)]
pub struct RejectedRequest {
    pub id: Value,
    pub error: ProtocolError,
}

impl RejectedRequest {
    pub fn into_response(self) -> JsonRpcResponse {
        JsonRpcResponse::error(self.id, &self.error)
    }
}

/// Parse one request line.
pub fn parse_request(line: &str) -> Result<JsonRpcRequest, RejectedRequest> {
    let value: Value = serde_json::from_str(line).map_err(|e| RejectedRequest {
        id: Value::Null,
        error: ProtocolError::ParseError(e.to_string()),
    })?;

    // serde folds an explicit `"id": null` into `None`; keep it as a real id.
    let id_field = value.get("id").cloned();
    let id = id_field.clone().unwrap_or(Value::Null);

    let mut request: JsonRpcRequest =
        serde_json::from_value(value).map_err(|e| RejectedRequest {
            id: id.clone(),
            error: ProtocolError::InvalidRequest(e.to_string()),
        })?;
    request.id = id_field;

    if request.jsonrpc != JSONRPC_VERSION {
        return Err(RejectedRequest {
            id,
            error: ProtocolError::InvalidRequest(format!(
                "unsupported jsonrpc version {:?}",
                request.jsonrpc
            )),
        });
    }

    Ok(request)
}

/// MCP tool call result wrapping a serialized tool outcome.
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<TextContent>,
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl ToolCallResult {
    /// Wrap a tool outcome. Failed outcomes are still results, not errors.
    pub fn from_outcome<T: Serialize>(outcome: &T) -> Result<Self, serde_json::Error> {
        let structured = serde_json::to_value(outcome)?;
        let text = serde_json::to_string_pretty(&structured)?;
        Ok(Self {
            content: vec![TextContent { kind: "text", text }],
            structured_content: Some(structured),
            is_error: false,
        })
    }

    /// A call the server refused to run, reported back as a tool error.
    pub fn rejection(err: &ToolCallError) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: err.to_string(),
            }],
            structured_content: None,
            is_error: true,
        }
    }

    pub fn into_value(self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
