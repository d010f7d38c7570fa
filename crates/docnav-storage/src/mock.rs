//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Extract directory and filename from a path.
fn split_path(path: &Path) -> (PathBuf, String) {
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, name)
}

/// Mock storage for testing.
///
/// Stores directories and content in memory. Directory listings keep
/// insertion order, so tests can pin the exact order a real filesystem
/// would have returned.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use docnav_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guide/setup.md", "# Setup\n\nSteps.")
///     .with_file("guide/index.md", "# Guide");
///
/// let names = storage.list(Path::new("guide")).unwrap();
/// assert_eq!(names, ["setup.md", "index.md"]);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    dirs: HashMap<PathBuf, Vec<String>>,
    contents: HashMap<PathBuf, String>,
    unreadable: HashSet<PathBuf>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty directory.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.entry(dir.into()).or_default();
        self
    }

    /// Add a document with content.
    ///
    /// The parent directory is created if needed and the file name is
    /// appended to its listing.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path: PathBuf = path.into();
        self.register(&path);
        self.contents.insert(path, content.into());
        self
    }

    /// Add a document that is listed but fails to read with permission denied.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        self.register(&path);
        self.unreadable.insert(path);
        self
    }

    /// Add a file name to its parent directory listing (once).
    fn register(&mut self, path: &Path) {
        let (dir, name) = split_path(path);
        let names = self.dirs.entry(dir).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
    }
}

impl Storage for MockStorage {
    fn list(&self, dir: &Path) -> Result<Vec<String>, StorageError> {
        StorageError::validate_relative(dir).map_err(|e| e.with_backend(BACKEND))?;
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| StorageError::not_found(dir).with_backend(BACKEND))
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        StorageError::validate_relative(path).map_err(|e| e.with_backend(BACKEND))?;
        if self.unreadable.contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}
