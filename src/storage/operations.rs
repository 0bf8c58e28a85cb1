//! Storage operations
//!
//! Writes Markdown files and lists recently modified ones. Both entry points
//! convert every error into a failure result; nothing is retried.

use log::{info, warn};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::StorageError;
use crate::error::handlers::handle_storage_error;
use crate::storage::filesystem::{
    create_directory, directory_exists, epoch_seconds, file_size, path_exists, write_text,
};
use crate::storage::paths::{StorageRoot, is_markdown_name, subfolder_label};
use crate::storage::requests::{ListRequest, WriteRequest};
use crate::storage::results::{
    Failure, FileRecord, ListResult, Listing, Outcome, WriteResult, WrittenFile,
};

/// Builds the file body: optional `# title` heading, the content, and a trailing newline.
pub fn compose_body(title: Option<&str>, content: &str) -> String {
    let mut body = String::with_capacity(content.len() + 64);

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        body.push_str("# ");
        body.push_str(title);
        body.push_str("\n\n");
    }

    body.push_str(content);

    if !body.ends_with('\n') {
        body.push('\n');
    }

    body
}

/// Writes `request.content` as a Markdown file under the storage root.
pub fn write_markdown(root: &StorageRoot, request: &WriteRequest) -> WriteResult {
    let (target_dir, filename) = root.resolve_file(&request.subfolder, &request.filename);
    let file_path = target_dir.join(&filename);

    match store_markdown(&target_dir, &file_path, &filename, request) {
        Ok(written) => {
            info!(
                "Wrote file {} ({} bytes)",
                written.file_path, written.file_size
            );
            Outcome::Success(written)
        }
        Err(e) => {
            handle_storage_error("write", &e);
            let mut failure = Failure::from_error(&e).with_filename(filename);
            if matches!(e, StorageError::FileAlreadyExists(_)) {
                failure = failure.with_file_path(file_path.to_string_lossy());
            }
            Outcome::Failure(failure)
        }
    }
}

fn store_markdown(
    target_dir: &Path,
    file_path: &Path,
    filename: &str,
    request: &WriteRequest,
) -> Result<WrittenFile, StorageError> {
    if path_exists(file_path) && !request.overwrite {
        return Err(StorageError::FileAlreadyExists(filename.to_string()));
    }

    create_directory(target_dir).map_err(|e| write_error(e, filename))?;

    let body = compose_body(request.title.as_deref(), &request.content);
    write_text(file_path, &body).map_err(|e| write_error(e, filename))?;

    let size = file_size(file_path).map_err(|e| write_error(e, filename))?;

    Ok(WrittenFile {
        file_path: file_path.to_string_lossy().to_string(),
        filename: filename.to_string(),
        subfolder: subfolder_label(&request.subfolder),
        message: format!("Successfully wrote Markdown file: {}", filename),
        file_size: size,
    })
}

fn write_error(error: io::Error, filename: &str) -> StorageError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        StorageError::PermissionDenied(filename.to_string())
    } else {
        StorageError::IoError(error)
    }
}

/// Lists Markdown files under the search directory, most recently modified first.
pub fn list_recent_markdown(root: &StorageRoot, request: &ListRequest) -> ListResult {
    let search_dir = root.resolve_dir(&request.subfolder);

    match collect_recent(root, &search_dir, request) {
        Ok(files) => {
            info!(
                "Listed {} Markdown files under {}",
                files.len(),
                search_dir.display()
            );
            Outcome::Success(Listing {
                message: format!("Found {} Markdown files", files.len()),
                storage_path: root.path().to_string_lossy().to_string(),
                search_directory: search_dir.to_string_lossy().to_string(),
                subfolder: subfolder_label(&request.subfolder),
                total_found: files.len(),
                files,
            })
        }
        Err(e) => {
            handle_storage_error("list", &e);
            Outcome::Failure(Failure::from_error(&e).with_empty_files())
        }
    }
}

fn collect_recent(
    root: &StorageRoot,
    search_dir: &Path,
    request: &ListRequest,
) -> Result<Vec<FileRecord>, StorageError> {
    if !path_exists(search_dir) {
        return Err(StorageError::DirectoryNotFound(
            search_dir.to_string_lossy().to_string(),
        ));
    }

    if !directory_exists(search_dir) {
        return Err(StorageError::NotADirectory(
            search_dir.to_string_lossy().to_string(),
        ));
    }

    let mut records = Vec::new();

    for entry in WalkDir::new(search_dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                warn!("Skipping unreadable entry under {}: {}", search_dir.display(), e);
                continue;
            }
            Err(e) => return Err(StorageError::from(e)),
        };

        if !is_markdown_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        records.push(file_record(root, path)?);
    }

    // Stable sort keeps enumeration order for equal timestamps.
    records.sort_by(|a, b| b.modified.total_cmp(&a.modified));
    records.truncate(request.keep_count(records.len()));

    Ok(records)
}

fn file_record(root: &StorageRoot, path: &Path) -> Result<FileRecord, StorageError> {
    let metadata = fs::metadata(path)?;
    let modified = metadata.modified()?;
    let created = metadata.created().unwrap_or(modified);

    Ok(FileRecord {
        path: path.to_string_lossy().to_string(),
        relative_path: root.relative_display(path),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        size: metadata.len(),
        modified: epoch_seconds(modified),
        created: epoch_seconds(created),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::time::{Duration, SystemTime};

    fn root() -> (tempfile::TempDir, StorageRoot) {
        let dir = tempfile::tempdir().unwrap();
        let root = StorageRoot::establish(dir.path()).unwrap();
        (dir, root)
    }

    fn write_req(content: &str, filename: &str, title: Option<&str>) -> WriteRequest {
        WriteRequest {
            content: content.to_string(),
            filename: filename.to_string(),
            title: title.map(str::to_string),
            overwrite: false,
            subfolder: String::new(),
        }
    }

    fn touch(path: &Path, secs_ago: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    #[test]
    fn test_compose_body() {
        assert_eq!(compose_body(Some("Greeting"), "Hello"), "# Greeting\n\nHello\n");
        assert_eq!(compose_body(None, "Hello\n"), "Hello\n");
        assert_eq!(compose_body(Some(""), "Hello"), "Hello\n");
        assert_eq!(compose_body(None, ""), "\n");
        assert_eq!(compose_body(Some("T"), ""), "# T\n\n");
    }

    #[test]
    fn test_write_creates_file_with_composed_body() {
        let (_dir, root) = root();
        let result = write_markdown(&root, &write_req("Hello", "note", Some("Greeting")));

        let written = result.success().expect("write should succeed");
        assert_eq!(written.filename, "note.md");
        assert_eq!(written.subfolder, "root");
        assert_eq!(written.file_size, "# Greeting\n\nHello\n".len() as u64);
        let on_disk = fs::read_to_string(root.path().join("note.md")).unwrap();
        assert_eq!(on_disk, "# Greeting\n\nHello\n");
    }

    #[test]
    fn test_write_conflict_leaves_file_untouched() {
        let (_dir, root) = root();
        assert!(write_markdown(&root, &write_req("first", "a", None)).is_success());

        let result = write_markdown(&root, &write_req("second", "a.md", None));
        let failure = result.failure().expect("second write should fail");
        assert_eq!(failure.error_kind, ErrorKind::Conflict);
        assert_eq!(failure.filename.as_deref(), Some("a.md"));
        assert!(failure.file_path.is_some());
        assert!(failure.message.contains("a.md"));

        let on_disk = fs::read_to_string(root.path().join("a.md")).unwrap();
        assert_eq!(on_disk, "first\n");
    }

    #[test]
    fn test_write_overwrite_replaces_content() {
        let (_dir, root) = root();
        write_markdown(&root, &write_req("a much longer first body", "a", None));

        let mut req = write_req("short", "a", None);
        req.overwrite = true;
        let result = write_markdown(&root, &req);
        assert!(result.is_success());
        assert_eq!(
            fs::read_to_string(root.path().join("a.md")).unwrap(),
            "short\n"
        );
    }

    #[test]
    fn test_write_into_new_subfolder() {
        let (_dir, root) = root();
        let mut req = write_req("body", "entry", None);
        req.subfolder = "journal/2024".to_string();

        let result = write_markdown(&root, &req);
        let written = result.success().unwrap();
        assert_eq!(written.subfolder, "journal/2024");
        assert!(root.path().join("journal/2024/entry.md").is_file());
    }

    #[test]
    fn test_write_over_directory_is_filesystem_error() {
        let (_dir, root) = root();
        fs::create_dir(root.path().join("taken.md")).unwrap();

        let mut req = write_req("body", "taken", None);
        req.overwrite = true;
        let result = write_markdown(&root, &req);
        let failure = result.failure().unwrap();
        assert_eq!(failure.error_kind, ErrorKind::FilesystemError);
        assert_eq!(failure.filename.as_deref(), Some("taken.md"));
    }

    #[test]
    fn test_write_error_maps_permission_denied() {
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume");
        let err = write_error(denied, "locked.md");
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert_eq!(
            err.to_string(),
            "Permission denied, cannot write file: locked.md"
        );

        let failure = Failure::from_error(&err).with_filename("locked.md");
        assert_eq!(failure.error_kind, ErrorKind::PermissionDenied);
        assert_eq!(failure.filename.as_deref(), Some("locked.md"));

        let full = io::Error::new(io::ErrorKind::Other, "no space left");
        assert_eq!(write_error(full, "a.md").kind(), ErrorKind::FilesystemError);
    }

    #[test]
    fn test_list_empty_directory() {
        let (_dir, root) = root();
        let result = list_recent_markdown(&root, &ListRequest::new(10, ""));
        let listing = result.success().unwrap();
        assert!(listing.files.is_empty());
        assert_eq!(listing.total_found, 0);
        assert_eq!(listing.subfolder, "root");
    }

    #[test]
    fn test_list_missing_subfolder() {
        let (_dir, root) = root();
        let result = list_recent_markdown(&root, &ListRequest::new(10, "nope"));
        let failure = result.failure().unwrap();
        assert_eq!(failure.error_kind, ErrorKind::NotFound);
        assert_eq!(failure.files.as_deref(), Some(&[][..]));
        assert!(failure.message.contains("does not exist"));
    }

    #[test]
    fn test_list_file_as_subfolder() {
        let (_dir, root) = root();
        fs::write(root.path().join("plain.txt"), "x").unwrap();
        let result = list_recent_markdown(&root, &ListRequest::new(10, "plain.txt"));
        let failure = result.failure().unwrap();
        assert_eq!(failure.error_kind, ErrorKind::NotFound);
        assert!(failure.message.contains("not a directory"));
    }

    #[test]
    fn test_list_sorts_and_truncates() {
        let (_dir, root) = root();
        fs::create_dir_all(root.path().join("deep/er")).unwrap();
        let files = [
            ("old.md", 300),
            ("deep/mid.md", 200),
            ("deep/er/new.md", 10),
            ("newest.md", 1),
        ];
        for (name, age) in files {
            let path = root.path().join(name);
            fs::write(&path, "x").unwrap();
            touch(&path, age);
        }
        fs::write(root.path().join("ignored.txt"), "x").unwrap();

        let result = list_recent_markdown(&root, &ListRequest::new(3, ""));
        let listing = result.success().unwrap();
        let names: Vec<&str> = listing.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["newest.md", "new.md", "mid.md"]);
        assert_eq!(listing.total_found, 3);
        assert!(
            listing
                .files
                .windows(2)
                .all(|w| w[0].modified >= w[1].modified)
        );
        let deep = &listing.files[1];
        assert_eq!(
            deep.relative_path,
            Path::new("deep").join("er").join("new.md").to_string_lossy()
        );
    }

    #[test]
    fn test_list_negative_limit_drops_oldest() {
        let (_dir, root) = root();
        for (name, age) in [("a.md", 30), ("b.md", 20), ("c.md", 10)] {
            let path = root.path().join(name);
            fs::write(&path, "x").unwrap();
            touch(&path, age);
        }

        let result = list_recent_markdown(&root, &ListRequest::new(-1, ""));
        let listing = result.success().unwrap();
        let names: Vec<&str> = listing.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c.md", "b.md"]);
        assert_eq!(listing.total_found, 2);

        let result = list_recent_markdown(&root, &ListRequest::new(-5, ""));
        assert!(result.success().unwrap().files.is_empty());
    }

    #[test]
    fn test_list_scoped_to_subfolder() {
        let (_dir, root) = root();
        fs::create_dir(root.path().join("a")).unwrap();
        fs::write(root.path().join("a/in.md"), "x").unwrap();
        fs::write(root.path().join("out.md"), "x").unwrap();

        let result = list_recent_markdown(&root, &ListRequest::new(10, "a"));
        let listing = result.success().unwrap();
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].name, "in.md");
        assert_eq!(
            listing.files[0].relative_path,
            Path::new("a").join("in.md").to_string_lossy()
        );
        assert_eq!(listing.subfolder, "a");
    }
}
