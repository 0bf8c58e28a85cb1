use log::{error, info, warn};
use serde_json::Value;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ServerConfig;
use crate::error::handlers::handle_protocol_error;
use crate::error::{ProtocolError, ServerError};
use crate::protocol::{JsonRpcResponse, handle_request, parse_request};
use crate::storage::StorageRoot;

pub struct Server {
    config: ServerConfig,
    root: StorageRoot,
}

impl Server {
    /// Prepares the storage root; fails if it cannot be created.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let root = StorageRoot::establish(config.storage_root_path())
            .map_err(|e| ServerError::StorageRoot(config.storage_root.clone(), e))?;

        info!("Storage root: {}", root.path().display());

        Ok(Self { config, root })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn root(&self) -> &StorageRoot {
        &self.root
    }

    /// Serves requests from stdin until it closes. Responses go to stdout.
    pub async fn start(&self) -> Result<(), ServerError> {
        info!("Starting {} on stdio", self.config.server_name);

        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Reads one request per line and writes one response per line.
    ///
    /// Requests are handled strictly in arrival order.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();
            let n = match reader.read_line(&mut line).await {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    // Not UTF-8; the bytes read so far are discarded.
                    let err = ProtocolError::ParseError(e.to_string());
                    handle_protocol_error(&err);
                    write_response(&mut writer, &JsonRpcResponse::error(Value::Null, &err))
                        .await?;
                    continue;
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    return Err(ServerError::IoError(e));
                }
            };

            if n == 0 {
                info!("Input closed, shutting down");
                return Ok(());
            }

            if line.len() > self.config.max_request_length {
                let err = ProtocolError::RequestTooLong(line.len());
                handle_protocol_error(&err);
                write_response(&mut writer, &JsonRpcResponse::error(Value::Null, &err)).await?;
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let response = match parse_request(trimmed) {
                Ok(request) => handle_request(&request, &self.config, &self.root),
                Err(rejected) => {
                    handle_protocol_error(&rejected.error);
                    Some(rejected.into_response())
                }
            };

            if let Some(response) = response {
                write_response(&mut writer, &response).await?;
            }
        }
    }
}

/// Write a JSON-RPC response as one line and flush it.
async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &JsonRpcResponse,
) -> Result<(), ServerError> {
    let line = match response.to_line() {
        Ok(line) => line,
        Err(e) => {
            warn!("Failed to serialize response: {}", e);
            let fallback = JsonRpcResponse::error(
                response.id.clone(),
                &ProtocolError::Internal(e.to_string()),
            );
            fallback.to_line().map_err(|e| {
                ServerError::IoError(io::Error::new(io::ErrorKind::InvalidData, e))
            })?
        }
    };

    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
