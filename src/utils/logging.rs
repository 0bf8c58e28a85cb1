//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::{Builder, Env, Target};

/// Setup logging for the server.
///
/// Logs go to stderr because stdout carries protocol responses. `RUST_LOG`
/// overrides the default `info` level.
pub fn setup_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();
}
