//! Server core functionality
//!
//! Owns the immutable configuration and storage root and runs the stdio
//! request loop.

pub mod core;

pub use self::core::Server;
