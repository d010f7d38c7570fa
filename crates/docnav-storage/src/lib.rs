//! Storage abstraction for docnav.
//!
//! This crate provides a [`Storage`] trait that hides where documents come from
//! behind two read-only operations:
//!
//! - `list()` returns the file names of one directory in listing order
//! - `read()` returns the full text of one document
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list()` and `read()` methods
//! - [`FsStorage`] implementation backed by the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//! - [`StorageError`], the single error type for every filesystem failure
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use docnav_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new("docs");
//! for name in storage.list(Path::new("guide"))? {
//!     println!("{name}");
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
