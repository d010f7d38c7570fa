//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for listing directories and reading
//! documents, along with [`StorageError`] for unified error handling across
//! backends.
//!
//! # Path Convention
//!
//! All path parameters are **relative** to the storage root:
//! - `"guide"` - a section directory of the root locale
//! - `"zh/guide"` - a section directory of the `zh` locale
//! - `"zh/guide/setup.md"` - a single document
//!
//! Absolute paths and `..` components are rejected with
//! [`StorageErrorKind::InvalidPath`].

use std::path::{Component, Path, PathBuf};

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Directory or document does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path escapes the storage root or is otherwise malformed.
    InvalidPath,
    /// Other I/O failure.
    Other,
}

/// Storage error with semantic kind, offending path and backend-specific source.
///
/// Every filesystem failure surfaces as this type. Callers never retry:
/// the operation that produced the error is aborted as a whole.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }

    /// Check that `path` stays inside the storage root.
    ///
    /// Rejects absolute paths and parent directory components (`..`).
    pub fn validate_relative(path: &Path) -> Result<(), Self> {
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(Self::new(StorageErrorKind::InvalidPath).with_path(path));
        }
        Ok(())
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only access to a tree of documents.
///
/// Implementations must be safe to share across threads: the indexer reads
/// several documents of one directory concurrently.
pub trait Storage: Send + Sync {
    /// List the file names of a directory.
    ///
    /// Only regular files are returned, as bare names (no directory part),
    /// in the order the backend enumerates them. No sorting is applied.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory doesn't exist, can't be
    /// read, or the path escapes the storage root.
    fn list(&self, dir: &Path) -> Result<Vec<String>, StorageError>;

    /// Read the full text of a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] identifying `path` if the document doesn't
    /// exist or can't be read.
    fn read(&self, path: &Path) -> Result<String, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_storage_error_with_path() {
        let err = StorageError::new(StorageErrorKind::NotFound).with_path("guide/setup.md");

        assert_eq!(err.path.as_deref(), Some(Path::new("guide/setup.md")));
    }

    #[test]
    fn test_storage_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound).with_source(io_err);

        assert!(err.downcast_source::<std::io::Error>().is_some());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_storage_error_io_maps_kinds() {
        let cases = [
            (std::io::ErrorKind::NotFound, StorageErrorKind::NotFound),
            (
                std::io::ErrorKind::PermissionDenied,
                StorageErrorKind::PermissionDenied,
            ),
            (std::io::ErrorKind::InvalidData, StorageErrorKind::Other),
        ];

        for (io_kind, expected) in cases {
            let err = StorageError::io(std::io::Error::new(io_kind, "boom"), "guide");
            assert_eq!(err.kind, expected, "io kind {io_kind:?}");
            assert_eq!(err.path.as_deref(), Some(Path::new("guide")));
        }
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("zh/guide")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: zh/guide)"
        );
    }

    #[test]
    fn test_validate_relative_accepts_nested() {
        assert!(StorageError::validate_relative(Path::new("zh/guide/setup.md")).is_ok());
        assert!(StorageError::validate_relative(Path::new("")).is_ok());
    }

    #[test]
    fn test_validate_relative_rejects_parent_dir() {
        let err = StorageError::validate_relative(Path::new("guide/../../etc")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_validate_relative_rejects_absolute() {
        let err = StorageError::validate_relative(Path::new("/etc/passwd")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
