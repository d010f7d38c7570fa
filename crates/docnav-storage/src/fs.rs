//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for listing and reading documents under a root
//! directory on the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// All paths passed to [`Storage`] methods are resolved against `root`.
/// Nothing is cached: every call hits the filesystem.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use docnav_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new("docs");
/// let names = storage.list(Path::new("guide"))?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Root directory that relative paths are resolved against.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a storage rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the working directory can't be determined.
    pub fn from_cwd() -> Result<Self, StorageError> {
        let cwd = std::env::current_dir()
            .map_err(|e| StorageError::io(e, ".").with_backend(BACKEND))?;
        Ok(Self::new(cwd))
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path against the root, rejecting escapes.
    fn resolve(&self, path: &Path) -> Result<PathBuf, StorageError> {
        StorageError::validate_relative(path).map_err(|e| e.with_backend(BACKEND))?;
        Ok(self.root.join(path))
    }
}

impl Storage for FsStorage {
    fn list(&self, dir: &Path) -> Result<Vec<String>, StorageError> {
        let full_dir = self.resolve(dir)?;
        let io_err = |e| StorageError::io(e, &full_dir).with_backend(BACKEND);

        let mut names = Vec::new();
        for entry in fs::read_dir(&full_dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let file_type = entry.file_type().map_err(io_err)?;
            let is_file =
                file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            // A name that isn't UTF-8 fails the listing instead of dropping the file.
            let Ok(name) = entry.file_name().into_string() else {
                return Err(StorageError::new(StorageErrorKind::InvalidPath)
                    .with_path(entry.path())
                    .with_backend(BACKEND));
            };
            names.push(name);
        }

        tracing::trace!(dir = %full_dir.display(), count = names.len(), "Listed directory");
        Ok(names)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let full_path = self.resolve(path)?;
        let bytes =
            fs::read(&full_path).map_err(|e| StorageError::io(e, &full_path).with_backend(BACKEND))?;
        // Invalid sequences become U+FFFD instead of failing the document.
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }
}
