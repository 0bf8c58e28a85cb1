//! Path resolution
//!
//! Maps a subfolder and filename onto a concrete location under the storage root.
//!
//! Subfolders are joined as given. `..` segments are not rejected, so a
//! subfolder can point outside the storage root.

use std::io;
use std::path::{Path, PathBuf};

use crate::storage::filesystem::create_directory;

/// Suffix carried by every managed file
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Label reported for operations on the storage root itself
pub const ROOT_LABEL: &str = "root";

/// Base directory for every Markdown file, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoot {
    path: PathBuf,
}

impl StorageRoot {
    /// Create the directory (with parents) if needed and pin its absolute path.
    pub fn establish(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        create_directory(path)?;
        let path = path.canonicalize()?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory an operation works in: the root, or the root joined with `subfolder`
    pub fn resolve_dir(&self, subfolder: &str) -> PathBuf {
        if subfolder.is_empty() {
            self.path.clone()
        } else {
            self.path.join(subfolder)
        }
    }

    /// Target directory and normalized filename for a write
    pub fn resolve_file(&self, subfolder: &str, filename: &str) -> (PathBuf, String) {
        (self.resolve_dir(subfolder), normalize_filename(filename))
    }

    /// Path relative to the root, or the full path when it lies elsewhere
    pub fn relative_display(&self, path: &Path) -> String {
        path.strip_prefix(&self.path)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

/// Append the Markdown extension unless the name already carries it
pub fn normalize_filename(filename: &str) -> String {
    if filename.ends_with(MARKDOWN_EXTENSION) {
        filename.to_string()
    } else {
        format!("{}{}", filename, MARKDOWN_EXTENSION)
    }
}

/// Whether a file name carries the Markdown extension
pub fn is_markdown_name(name: &str) -> bool {
    name.ends_with(MARKDOWN_EXTENSION)
}

/// Name reported back to callers for a subfolder argument
pub fn subfolder_label(subfolder: &str) -> String {
    if subfolder.is_empty() {
        ROOT_LABEL.to_string()
    } else {
        subfolder.to_string()
    }
}
