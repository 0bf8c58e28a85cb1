//! Module `commands`
//!
//! Maps JSON-RPC method names and tool call parameters onto typed commands.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ProtocolError, ToolCallError};
use crate::storage::{ListRequest, WriteRequest};

pub const WRITE_TOOL: &str = "write_txt_to_markdown";
pub const LIST_TOOL: &str = "list_recent_md_files";

/// A JSON-RPC method understood by the server.
#[derive(Debug, PartialEq)]
pub enum Method {
    Initialize,
    Initialized,
    Cancelled,
    Ping,
    ToolsList,
    ToolsCall(ToolCall),
    ToolRejected(ToolCallError), // tools/call naming an unknown tool or carrying bad arguments
    Unknown(String),
}

/// A parsed `tools/call` invocation.
#[derive(Debug, PartialEq)]
pub enum ToolCall {
    WriteMarkdown(WriteRequest),
    ListRecent(ListRequest),
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::WriteMarkdown(_) => WRITE_TOOL,
            ToolCall::ListRecent(_) => LIST_TOOL,
        }
    }
}

#[derive(Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    subfolder: String,
}

/// Parses a method name and its params.
///
/// `default_limit` fills in the listing limit when the caller omits it.
pub fn parse_method(
    method: &str,
    params: &Value,
    default_limit: usize,
) -> Result<Method, ProtocolError> {
    let parsed = match method {
        "initialize" => Method::Initialize,
        "initialized" | "notifications/initialized" => Method::Initialized,
        "notifications/cancelled" => Method::Cancelled,
        "ping" => Method::Ping,
        "tools/list" => Method::ToolsList,
        "tools/call" => match parse_tool_call(params, default_limit)? {
            Ok(call) => Method::ToolsCall(call),
            Err(rejected) => Method::ToolRejected(rejected),
        },
        other => Method::Unknown(other.to_string()),
    };
    Ok(parsed)
}

/// Parses `tools/call` params.
///
/// Malformed params (no tool name) are a protocol error. An unknown tool or
/// arguments that do not fit the tool are returned as the inner `Err`.
pub fn parse_tool_call(
    params: &Value,
    default_limit: usize,
) -> Result<Result<ToolCall, ToolCallError>, ProtocolError> {
    let call: CallParams = serde_json::from_value(params.clone())
        .map_err(|e| ProtocolError::InvalidParams(e.to_string()))?;

    if call.name.is_empty() {
        return Err(ProtocolError::InvalidParams("missing tool name".into()));
    }

    let arguments = match call.arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    Ok(parse_tool_arguments(&call.name, arguments, default_limit))
}

fn parse_tool_arguments(
    name: &str,
    arguments: Value,
    default_limit: usize,
) -> Result<ToolCall, ToolCallError> {
    let invalid = |e: serde_json::Error| ToolCallError::InvalidArguments {
        tool: name.to_string(),
        reason: e.to_string(),
    };

    match name {
        WRITE_TOOL => {
            let request: WriteRequest = serde_json::from_value(arguments).map_err(invalid)?;
            Ok(ToolCall::WriteMarkdown(request))
        }
        LIST_TOOL => {
            let args: ListArgs = serde_json::from_value(arguments).map_err(invalid)?;
            Ok(ToolCall::ListRecent(ListRequest::new(
                args.limit.unwrap_or(default_limit as i64),
                args.subfolder,
            )))
        }
        other => Err(ToolCallError::UnknownTool(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_basic_methods() {
        let none = Value::Null;
        assert_eq!(parse_method("initialize", &none, 10).unwrap(), Method::Initialize);
        assert_eq!(
            parse_method("notifications/initialized", &none, 10).unwrap(),
            Method::Initialized
        );
        assert_eq!(parse_method("ping", &none, 10).unwrap(), Method::Ping);
        assert_eq!(parse_method("tools/list", &none, 10).unwrap(), Method::ToolsList);
        assert_eq!(
            parse_method("resources/list", &none, 10).unwrap(),
            Method::Unknown("resources/list".to_string())
        );
    }

    #[test]
    fn test_parse_write_call_with_defaults() {
        let params = json!({
            "name": "write_txt_to_markdown",
            "arguments": {"content": "Hello", "filename": "note"}
        });
        let call = parse_tool_call(&params, 10).unwrap().unwrap();
        assert_eq!(
            call,
            ToolCall::WriteMarkdown(WriteRequest {
                content: "Hello".into(),
                filename: "note".into(),
                title: None,
                overwrite: false,
                subfolder: String::new(),
            })
        );
        assert_eq!(call.name(), WRITE_TOOL);
    }

    #[test]
    fn test_parse_list_call_limits() {
        let params = json!({"name": "list_recent_md_files"});
        let call = parse_tool_call(&params, 10).unwrap().unwrap();
        assert_eq!(call, ToolCall::ListRecent(ListRequest::new(10, "")));

        let params = json!({
            "name": "list_recent_md_files",
            "arguments": {"limit": 3, "subfolder": "daily"}
        });
        let call = parse_tool_call(&params, 10).unwrap().unwrap();
        assert_eq!(call, ToolCall::ListRecent(ListRequest::new(3, "daily")));

        let negative = json!({"name": "list_recent_md_files", "arguments": {"limit": -1}});
        let call = parse_tool_call(&negative, 10).unwrap().unwrap();
        assert_eq!(call, ToolCall::ListRecent(ListRequest::new(-1, "")));
    }

    #[test]
    fn test_bad_arguments_are_rejected_calls() {
        let missing_content = json!({
            "name": "write_txt_to_markdown",
            "arguments": {"filename": "x"}
        });
        match parse_method("tools/call", &missing_content, 10).unwrap() {
            Method::ToolRejected(ToolCallError::InvalidArguments { tool, reason }) => {
                assert_eq!(tool, WRITE_TOOL);
                assert!(reason.contains("content"));
            }
            other => panic!("unexpected method: {:?}", other),
        }

        let unknown = json!({"name": "delete_everything", "arguments": {}});
        assert_eq!(
            parse_method("tools/call", &unknown, 10).unwrap(),
            Method::ToolRejected(ToolCallError::UnknownTool("delete_everything".into()))
        );
    }

    #[test]
    fn test_malformed_params_are_protocol_errors() {
        assert!(matches!(
            parse_tool_call(&Value::Null, 10),
            Err(ProtocolError::InvalidParams(_))
        ));
        assert_eq!(
            parse_tool_call(&json!({"name": ""}), 10),
            Err(ProtocolError::InvalidParams("missing tool name".into()))
        );
    }
}
