//! Request handlers for the Markdown tool server.
//!
//! Dispatches each JSON-RPC method to its handler and builds the response.
//! Tool failures and rejected tool calls become ordinary results with
//! `isError` set accordingly; only malformed requests become JSON-RPC errors.

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::ServerConfig;
use crate::error::ProtocolError;
use crate::error::handlers::handle_protocol_error;
use crate::protocol::commands::{Method, ToolCall, parse_method};
use crate::protocol::messages::{JsonRpcRequest, JsonRpcResponse, ToolCallResult};
use crate::protocol::tools::tool_definitions;
use crate::storage::{StorageRoot, list_recent_markdown, write_markdown};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Dispatches a request and returns the response to send, if any.
///
/// # Arguments
///
/// * `request` - Parsed JSON-RPC request.
/// * `config` - Immutable server configuration.
/// * `root` - Storage root every tool call works under.
///
/// # Returns
///
/// * `None` for notifications, otherwise the response for `request.id`.
pub fn handle_request(
    request: &JsonRpcRequest,
    config: &ServerConfig,
    root: &StorageRoot,
) -> Option<JsonRpcResponse> {
    let result = parse_method(&request.method, &request.params, config.default_list_limit)
        .and_then(|method| handle_method(method, config, root));

    if request.is_notification() {
        if let Err(e) = &result {
            handle_protocol_error(e);
        }
        return None;
    }
    let id = request.id.clone().unwrap_or(Value::Null);

    match result {
        Ok(Some(value)) => Some(JsonRpcResponse::success(id, value)),
        Ok(None) => None,
        Err(e) => {
            handle_protocol_error(&e);
            Some(JsonRpcResponse::error(id, &e))
        }
    }
}

fn handle_method(
    method: Method,
    config: &ServerConfig,
    root: &StorageRoot,
) -> Result<Option<Value>, ProtocolError> {
    match method {
        Method::Initialize => Ok(Some(handle_initialize(config))),
        Method::Initialized => {
            info!("Client finished initialization");
            Ok(None)
        }
        Method::Cancelled => {
            debug!("Ignoring cancellation notice");
            Ok(None)
        }
        Method::Ping => Ok(Some(json!({}))),
        Method::ToolsList => Ok(Some(handle_tools_list(config))),
        Method::ToolsCall(call) => handle_tool_call(call, root).map(Some),
        Method::ToolRejected(err) => {
            warn!("Rejected tool call: {}", err);
            encode_result(ToolCallResult::rejection(&err)).map(Some)
        }
        Method::Unknown(name) => Err(ProtocolError::MethodNotFound(name)),
    }
}

/// Handles `initialize`: reports protocol version, capabilities and server info.
fn handle_initialize(config: &ServerConfig) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": config.server_name,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn handle_tools_list(config: &ServerConfig) -> Value {
    json!({ "tools": tool_definitions(config.default_list_limit) })
}

/// Runs a tool and wraps its outcome as an MCP tool result.
pub fn handle_tool_call(call: ToolCall, root: &StorageRoot) -> Result<Value, ProtocolError> {
    info!("Calling tool {}", call.name());

    match &call {
        ToolCall::WriteMarkdown(request) => wrap_outcome(&write_markdown(root, request)),
        ToolCall::ListRecent(request) => wrap_outcome(&list_recent_markdown(root, request)),
    }
}

fn wrap_outcome<T: Serialize>(outcome: &T) -> Result<Value, ProtocolError> {
    ToolCallResult::from_outcome(outcome)
        .map_err(encode_error)
        .and_then(encode_result)
}

fn encode_result(result: ToolCallResult) -> Result<Value, ProtocolError> {
    result.into_value().map_err(encode_error)
}

fn encode_error(e: serde_json::Error) -> ProtocolError {
    ProtocolError::Internal(format!("cannot encode tool result: {}", e))
}
