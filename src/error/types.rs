//! Error types
//!
//! Defines domain-specific error types for storage, protocol and server startup.

use serde::Serialize;
use std::fmt;
use std::io;

/// Public classification of a failed tool call, reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Conflict,
    PermissionDenied,
    FilesystemError,
    NotFound,
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Conflict => "conflict",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::FilesystemError => "filesystem_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    FileAlreadyExists(String),
    PermissionDenied(String),
    DirectoryNotFound(String),
    NotADirectory(String),
    IoError(io::Error),
    Unexpected(String),
}

impl StorageError {
    /// Classifies the error for reporting in a failure result.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::FileAlreadyExists(_) => ErrorKind::Conflict,
            StorageError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            StorageError::DirectoryNotFound(_) | StorageError::NotADirectory(_) => {
                ErrorKind::NotFound
            }
            StorageError::IoError(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                ErrorKind::PermissionDenied
            }
            StorageError::IoError(_) => ErrorKind::FilesystemError,
            StorageError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::FileAlreadyExists(name) => write!(
                f,
                "File already exists: {}. Use overwrite=true to replace it.",
                name
            ),
            StorageError::PermissionDenied(name) => {
                write!(f, "Permission denied, cannot write file: {}", name)
            }
            StorageError::DirectoryNotFound(p) => write!(f, "Directory does not exist: {}", p),
            StorageError::NotADirectory(p) => write!(f, "Path is not a directory: {}", p),
            StorageError::IoError(e) => write!(f, "File system error: {}", e),
            StorageError::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

impl From<walkdir::Error> for StorageError {
    fn from(error: walkdir::Error) -> Self {
        let message = error.to_string();
        match error.into_io_error() {
            Some(io_error) => StorageError::IoError(io_error),
            None => StorageError::Unexpected(message),
        }
    }
}

/// Channel-level faults in the JSON-RPC exchange
#[derive(Debug, PartialEq)]
pub enum ProtocolError {
    ParseError(String),
    InvalidRequest(String),
    RequestTooLong(usize),
    MethodNotFound(String),
    InvalidParams(String),
    Internal(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::ParseError(msg) => write!(f, "Invalid JSON: {}", msg),
            ProtocolError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ProtocolError::RequestTooLong(len) => {
                write!(f, "Request line too long: {} bytes", len)
            }
            ProtocolError::MethodNotFound(method) => write!(f, "Unknown method: {}", method),
            ProtocolError::InvalidParams(msg) => write!(f, "Invalid params: {}", msg),
            ProtocolError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// A tool call the server understood but cannot run with the given arguments.
///
/// Reported to the caller as a tool result flagged `isError`, not as a
/// JSON-RPC error.
#[derive(Debug, PartialEq)]
pub enum ToolCallError {
    UnknownTool(String),
    InvalidArguments { tool: String, reason: String },
}

impl fmt::Display for ToolCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolCallError::UnknownTool(name) => write!(f, "Unknown tool: {}", name),
            ToolCallError::InvalidArguments { tool, reason } => {
                write!(f, "Invalid arguments for {}: {}", tool, reason)
            }
        }
    }
}

impl std::error::Error for ToolCallError {}

/// Startup and transport failures of the server process
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    StorageRoot(String, io::Error),
    IoError(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::StorageRoot(path, e) => {
                write!(f, "Cannot prepare storage root {}: {}", path, e)
            }
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Config(e) => Some(e),
            ServerError::StorageRoot(_, e) | ServerError::IoError(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}
