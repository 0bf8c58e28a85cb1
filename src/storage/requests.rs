//! Storage request types
//!
//! Arguments accepted by the storage operations, deserialized straight from
//! tool call arguments.

use serde::Deserialize;

/// Arguments of a Markdown write
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WriteRequest {
    pub content: String,
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub subfolder: String,
}

/// Arguments of a recent-files listing
///
/// A negative `limit` drops that many of the oldest matches instead of
/// capping the count, so `-1` returns every file but the oldest.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    pub limit: i64,
    pub subfolder: String,
}

impl ListRequest {
    pub fn new(limit: i64, subfolder: impl Into<String>) -> Self {
        Self {
            limit,
            subfolder: subfolder.into(),
        }
    }

    /// Number of records kept out of `found` sorted matches
    pub fn keep_count(&self, found: usize) -> usize {
        let magnitude = usize::try_from(self.limit.unsigned_abs()).unwrap_or(usize::MAX);
        if self.limit >= 0 {
            magnitude.min(found)
        } else {
            found.saturating_sub(magnitude)
        }
    }
}
