//! md-scribe server - Entry Point
//!
//! Writes and lists Markdown files for a tool-calling client over stdio.
//! Usage: `md-scribe-server [STORAGE_ROOT]`

use log::{error, info};

use md_scribe_server::error::ServerError;
use md_scribe_server::utils::logging::setup_logging;
use md_scribe_server::{Server, ServerConfig};

#[tokio::main]
async fn main() {
    setup_logging();

    info!("Launching Markdown tool server...");

    if let Err(e) = run(std::env::args().nth(1)).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(storage_root: Option<String>) -> Result<(), ServerError> {
    let config = ServerConfig::load(storage_root)?;
    let server = Server::new(config)?;
    server.start().await
}
