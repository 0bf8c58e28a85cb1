//! Markdown file storage
//!
//! Handles path resolution, file writes and recent-file listings under the
//! storage root.

pub mod filesystem;
pub mod operations;
pub mod paths;
pub mod requests;
pub mod results;

pub use operations::{compose_body, list_recent_markdown, write_markdown};
pub use paths::StorageRoot;
pub use requests::{ListRequest, WriteRequest};
pub use results::{FileRecord, ListResult, Listing, Outcome, WriteResult, WrittenFile};
