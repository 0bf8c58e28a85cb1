//! Error handling
//!
//! Defines error types and handling for the Markdown tool server.

pub mod handlers;
pub mod types;

pub use types::*;
