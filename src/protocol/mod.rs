//! Tool invocation protocol
//!
//! JSON-RPC 2.0 over stdio: message framing, method parsing, tool catalogue
//! and request dispatch.

pub mod commands;
pub mod handlers;
pub mod messages;
pub mod tools;

pub use commands::{LIST_TOOL, Method, ToolCall, WRITE_TOOL, parse_method};
pub use handlers::handle_request;
pub use messages::{JsonRpcRequest, JsonRpcResponse, parse_request};
