//! File system operations
//!
//! Thin wrappers over `std::fs` used by the storage operations.

use std::fs;
use std::io::Result;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Create a directory and any missing parents
pub fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
}

/// Check if anything exists at the path (file, directory or other)
pub fn path_exists(path: &Path) -> bool {
    path.exists()
}

/// Check if directory exists
pub fn directory_exists(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Write text as UTF-8, replacing any previous content
pub fn write_text(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body.as_bytes())
}

/// Size of the file in bytes
pub fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)?.len())
}

/// Seconds since the Unix epoch, negative for earlier times
pub fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}
