//! Storage result types
//!
//! Defines result structures returned by storage operations. Every result
//! serializes as one JSON object with a boolean `success` field beside the
//! fields of the outcome.

use serde::{Serialize, Serializer};

use crate::error::{ErrorKind, StorageError};

/// Outcome of a tool call: either the operation's payload or a failure record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn message(&self) -> &str
    where
        T: HasMessage,
    {
        match self {
            Outcome::Success(body) => body.message(),
            Outcome::Failure(failure) => &failure.message,
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(body) => Some(body),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }
}

/// Payloads that carry a human-readable message
pub trait HasMessage {
    fn message(&self) -> &str;
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    success: bool,
    #[serde(flatten)]
    body: &'a T,
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Success(body) => Tagged {
                success: true,
                body,
            }
            .serialize(serializer),
            Outcome::Failure(failure) => Tagged {
                success: false,
                body: failure,
            }
            .serialize(serializer),
        }
    }
}

/// Failure record shared by both tools
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub error_kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileRecord>>,
}

impl Failure {
    pub fn from_error(err: &StorageError) -> Self {
        Self {
            error_kind: err.kind(),
            message: err.to_string(),
            filename: None,
            file_path: None,
            files: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Listing failures always report an empty file sequence
    pub fn with_empty_files(mut self) -> Self {
        self.files = Some(Vec::new());
        self
    }
}

/// Result of a Markdown write
pub type WriteResult = Outcome<WrittenFile>;

/// Result of a recent-files listing
pub type ListResult = Outcome<Listing>;

/// Details of a successfully written file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrittenFile {
    pub file_path: String,
    pub filename: String,
    pub subfolder: String,
    pub message: String,
    pub file_size: u64,
}

impl HasMessage for WrittenFile {
    fn message(&self) -> &str {
        &self.message
    }
}

/// One Markdown file found by a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    pub path: String,
    pub relative_path: String,
    pub name: String,
    pub size: u64,
    pub modified: f64,
    pub created: f64,
}

/// Files found by a listing, most recently modified first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub message: String,
    pub storage_path: String,
    pub search_directory: String,
    pub subfolder: String,
    pub files: Vec<FileRecord>,
    pub total_found: usize,
}

impl HasMessage for Listing {
    fn message(&self) -> &str {
        &self.message
    }
}
