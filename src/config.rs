//! Configuration management for the Markdown tool server
//!
//! Settings are resolved once at startup from built-in defaults, an optional
//! `md-scribe.toml` next to the working directory, and finally the storage
//! root passed on the command line. The result never changes afterwards.

use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Base name of the optional configuration file (extension picked by `config`)
pub const CONFIG_FILE_NAME: &str = "md-scribe";

pub const DEFAULT_STORAGE_ROOT: &str = "./markdown_storage";
pub const DEFAULT_SERVER_NAME: &str = "txt-to-md-converter";
pub const DEFAULT_LIST_LIMIT: usize = 10;
pub const DEFAULT_MAX_REQUEST_LENGTH: usize = 8 * 1024 * 1024;

/// Immutable server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Directory under which every Markdown file is read and written
    pub storage_root: String,

    /// Name reported in the `initialize` handshake
    pub server_name: String,

    /// Number of files returned by a listing when the caller gives no limit
    pub default_list_limit: usize,

    /// Longest accepted request line, in bytes
    pub max_request_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage_root: DEFAULT_STORAGE_ROOT.to_string(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            default_list_limit: DEFAULT_LIST_LIMIT,
            max_request_length: DEFAULT_MAX_REQUEST_LENGTH,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, `md-scribe.toml` and the CLI storage root
    pub fn load(cli_storage_root: Option<String>) -> Result<Self, ConfigError> {
        Self::load_from(Some(CONFIG_FILE_NAME), cli_storage_root)
    }

    /// Load configuration, optionally reading the named file
    pub fn load_from(
        config_file: Option<&str>,
        cli_storage_root: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("storage_root", DEFAULT_STORAGE_ROOT)?
            .set_default("server_name", DEFAULT_SERVER_NAME)?
            .set_default("default_list_limit", DEFAULT_LIST_LIMIT as i64)?
            .set_default("max_request_length", DEFAULT_MAX_REQUEST_LENGTH as i64)?;

        if let Some(name) = config_file {
            builder = builder.add_source(File::with_name(name).required(false));
        }

        if let Some(root) = cli_storage_root {
            builder = builder.set_override("storage_root", root)?;
        }

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_root.trim().is_empty() {
            return Err(ConfigError::Message("storage_root cannot be empty".into()));
        }

        if self.server_name.trim().is_empty() {
            return Err(ConfigError::Message("server_name cannot be empty".into()));
        }

        if self.default_list_limit == 0 {
            return Err(ConfigError::Message(
                "default_list_limit must be greater than 0".into(),
            ));
        }

        if self.max_request_length == 0 {
            return Err(ConfigError::Message(
                "max_request_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get storage root as PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }
}
