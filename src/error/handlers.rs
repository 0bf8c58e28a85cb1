//! Error handlers
//!
//! Logging and protocol code mapping for errors.

use crate::error::types::{ProtocolError, StorageError};
use log::{error, warn};

/// Log a storage error raised while serving a tool call
pub fn handle_storage_error(tool: &str, err: &StorageError) {
    error!("[{}] {} ({})", tool, err, err.kind());
}

/// Log a protocol error raised while reading a request
pub fn handle_protocol_error(err: &ProtocolError) {
    warn!("Protocol error: {}", err);
}

/// Convert error to JSON-RPC error code
pub fn error_to_rpc_code(err: &ProtocolError) -> i64 {
    match err {
        ProtocolError::ParseError(_) => -32700,
        ProtocolError::InvalidRequest(_) => -32600,
        ProtocolError::RequestTooLong(_) => -32600,
        ProtocolError::MethodNotFound(_) => -32601,
        ProtocolError::InvalidParams(_) => -32602,
        ProtocolError::Internal(_) => -32603,
    }
}
