//! Section indexing.
//!
//! [`NavigationIndexer`] turns one section directory into one
//! [`NavigationNode`]:
//!
//! 1. List the section directory through [`Storage`]
//! 2. Keep `.md` files that are not ignored, in listing order
//! 3. Read every kept file and take its first `# ` heading as title,
//!    falling back to the file name without extension
//! 4. Link each file as `{locale prefix}/{section}/{stem}`
//!
//! Any storage failure aborts the whole call. There is no partial result:
//! a sidebar that silently misses documents, or a silently empty section
//! for a mistyped directory, would look valid while being wrong.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use docnav_config::Config;
use docnav_storage::{FsStorage, Storage, StorageError};
use rayon::prelude::*;

use crate::locale::Locale;
use crate::navigation::{EntryOrder, NavLink, NavigationNode, SidebarOptions};
use crate::title::document_title;

/// Extension of indexed documents.
pub const DOCUMENT_EXTENSION: &str = ".md";

/// Builds sidebar sections from a document [`Storage`].
///
/// Holds no state between calls: indexing an unchanged directory twice
/// yields equal nodes.
pub struct NavigationIndexer {
    storage: Arc<dyn Storage>,
    /// Directory of the default locale, relative to the storage root.
    root_locale_dir: Option<String>,
}

impl NavigationIndexer {
    /// Create an indexer whose default locale lives directly in the storage root.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            root_locale_dir: None,
        }
    }

    /// Create a filesystem-backed indexer for a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let docs = &config.docs_resolved;
        let indexer = Self::new(Arc::new(FsStorage::new(&docs.root)));
        match &docs.root_locale_dir {
            Some(dir) => indexer.with_root_locale_dir(dir.as_str()),
            None => indexer,
        }
    }

    /// Serve the default locale's sections from `dir` (e.g. `"en"`).
    ///
    /// Links of the default locale stay unprefixed.
    #[must_use]
    pub fn with_root_locale_dir(mut self, dir: impl Into<String>) -> Self {
        let dir = dir.into();
        self.root_locale_dir = (!dir.is_empty()).then_some(dir);
        self
    }

    /// Index one section of one locale.
    ///
    /// `section` is a directory relative to the locale directory; leading and
    /// trailing slashes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the section directory is missing or
    /// unreadable, if any kept document can't be read (the error names that
    /// document), or if `section` escapes the storage root.
    pub fn generate(
        &self,
        locale: &Locale,
        section: &str,
        options: &SidebarOptions,
    ) -> Result<NavigationNode, StorageError> {
        let start = Instant::now();
        let section = section.trim_matches('/');
        let dir = locale
            .content_dir(self.root_locale_dir.as_deref())
            .join(section);

        let mut files: Vec<String> = self
            .storage
            .list(&dir)?
            .into_iter()
            .filter(|name| name.ends_with(DOCUMENT_EXTENSION) && !options.is_ignored(name))
            .collect();
        if options.order == EntryOrder::Name {
            files.sort();
        }

        let prefix = locale.link_prefix();
        let children = files
            .par_iter()
            .map(|file| self.index_document(&dir, &prefix, section, file))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            locale = %locale,
            section,
            entries = children.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Indexed sidebar section"
        );

        Ok(NavigationNode {
            label: options.title.clone(),
            collapsed_by_default: options.collapsible,
            children,
        })
    }

    /// Read one document and build its link.
    fn index_document(
        &self,
        dir: &Path,
        prefix: &str,
        section: &str,
        file: &str,
    ) -> Result<NavLink, StorageError> {
        let content = self.storage.read(&dir.join(file))?;
        let stem = file.strip_suffix(DOCUMENT_EXTENSION).unwrap_or(file);

        Ok(NavLink {
            text: document_title(stem, &content),
            link: document_link(prefix, section, stem),
        })
    }
}

/// Link of a document: `{prefix}/{section}/{stem}`, skipping an empty section.
fn document_link(prefix: &str, section: &str, stem: &str) -> String {
    if section.is_empty() {
        format!("{prefix}/{stem}")
    } else {
        format!("{prefix}/{section}/{stem}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_storage::{MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn indexer(storage: MockStorage) -> NavigationIndexer {
        NavigationIndexer::new(Arc::new(storage))
    }

    fn link(text: &str, link: &str) -> NavLink {
        NavLink {
            text: text.to_owned(),
            link: link.to_owned(),
        }
    }

    #[test]
    fn test_indexer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NavigationIndexer>();
    }

    #[test]
    fn test_generate_root_locale() {
        let storage = MockStorage::new()
            .with_file("guide/setup.md", "# Setup Guide\n\nSteps.")
            .with_file("guide/usage.md", "# Usage\n");

        let node = indexer(storage)
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap();

        assert_eq!(
            node,
            NavigationNode {
                label: "Guide".to_owned(),
                collapsed_by_default: false,
                children: vec![
                    link("Setup Guide", "/guide/setup"),
                    link("Usage", "/guide/usage"),
                ],
            }
        );
    }

    #[test]
    fn test_generate_named_locale_without_heading() {
        let storage = MockStorage::new().with_file("zh/guide/setup.md", "没有标题。");

        let node = indexer(storage)
            .generate(&Locale::parse("zh"), "guide", &SidebarOptions::new("指南"))
            .unwrap();

        assert_eq!(node.children, vec![link("setup", "/zh/guide/setup")]);
    }

    #[test]
    fn test_generate_root_locale_dir_keeps_links_unprefixed() {
        let storage = MockStorage::new()
            .with_file("en/guide/setup.md", "# Setup")
            .with_file("zh/guide/setup.md", "# 安装");
        let indexer = indexer(storage).with_root_locale_dir("en");

        let root = indexer
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap();
        let zh = indexer
            .generate(&Locale::parse("zh"), "guide", &SidebarOptions::new("指南"))
            .unwrap();

        assert_eq!(root.children, vec![link("Setup", "/guide/setup")]);
        assert_eq!(zh.children, vec![link("安装", "/zh/guide/setup")]);
    }

    #[test]
    fn test_generate_excludes_index_by_default() {
        let storage = MockStorage::new()
            .with_file("guide/index.md", "# Guide")
            .with_file("guide/setup.md", "# Setup");

        let node = indexer(storage)
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap();

        assert_eq!(node.children, vec![link("Setup", "/guide/setup")]);
    }

    #[test]
    fn test_generate_custom_ignore_replaces_default() {
        let storage = MockStorage::new()
            .with_file("guide/index.md", "# Overview")
            .with_file("guide/draft.md", "# Draft")
            .with_file("guide/setup.md", "# Setup");
        let options = SidebarOptions::new("Guide").ignore(["draft.md"]);

        let node = indexer(storage)
            .generate(&Locale::Root, "guide", &options)
            .unwrap();

        assert_eq!(
            node.children,
            vec![link("Overview", "/guide/index"), link("Setup", "/guide/setup")]
        );
    }

    #[test]
    fn test_generate_skips_non_documents() {
        let storage = MockStorage::new()
            .with_file("guide/setup.md", "# Setup")
            .with_file("guide/diagram.png", "")
            .with_file("guide/notes.markdown", "# Notes")
            .with_file("guide/README", "# Readme");

        let node = indexer(storage)
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap();

        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_generate_child_count_matches_documents() {
        let mut storage = MockStorage::new().with_file("guide/index.md", "# Guide");
        for i in 0..25 {
            storage = storage.with_file(format!("guide/{i:02}-page.md"), format!("# Page {i}"));
        }

        let node = indexer(storage)
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap();

        assert_eq!(node.children.len(), 25);
    }

    #[test]
    fn test_generate_preserves_listing_order() {
        let storage = MockStorage::new()
            .with_file("guide/zeta.md", "# Zeta")
            .with_file("guide/alpha.md", "# Alpha")
            .with_file("guide/mid.md", "# Mid");

        let node = indexer(storage)
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap();

        let texts: Vec<_> = node.children.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_generate_name_order_sorts() {
        let storage = MockStorage::new()
            .with_file("guide/02-build.md", "# Build")
            .with_file("guide/10-faq.md", "# FAQ")
            .with_file("guide/01-intro.md", "# Intro");
        let options = SidebarOptions::new("Guide").order(EntryOrder::Name);

        let node = indexer(storage)
            .generate(&Locale::Root, "guide", &options)
            .unwrap();

        let texts: Vec<_> = node.children.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Intro", "Build", "FAQ"]);
    }

    #[test]
    fn test_generate_collapsible() {
        let storage = MockStorage::new().with_dir("design");
        let options = SidebarOptions::new("Design").collapsible(true);

        let node = indexer(storage)
            .generate(&Locale::Root, "design", &options)
            .unwrap();

        assert!(node.collapsed_by_default);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_generate_is_idempotent() {
        let storage = MockStorage::new()
            .with_file("guide/b.md", "# B")
            .with_file("guide/a.md", "no heading");
        let indexer = indexer(storage);
        let options = SidebarOptions::new("Guide");

        let first = indexer.generate(&Locale::Root, "guide", &options).unwrap();
        let second = indexer.generate(&Locale::Root, "guide", &options).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_trims_section_slashes() {
        let storage = MockStorage::new().with_file("guide/setup.md", "# Setup");

        let node = indexer(storage)
            .generate(&Locale::Root, "/guide/", &SidebarOptions::new("Guide"))
            .unwrap();

        assert_eq!(node.children, vec![link("Setup", "/guide/setup")]);
    }

    #[test]
    fn test_generate_nested_section() {
        let storage = MockStorage::new().with_file("zh/design/server/index-format.md", "");

        let node = indexer(storage)
            .generate(
                &Locale::parse("zh"),
                "design/server",
                &SidebarOptions::new("Server"),
            )
            .unwrap();

        assert_eq!(
            node.children,
            vec![link("index-format", "/zh/design/server/index-format")]
        );
    }

    #[test]
    fn test_generate_missing_directory_fails() {
        let storage = MockStorage::new().with_file("guide/setup.md", "# Setup");

        let err = indexer(storage)
            .generate(&Locale::parse("zh"), "guide", &SidebarOptions::new("指南"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("zh/guide")));
    }

    #[test]
    fn test_generate_unreadable_document_fails() {
        let storage = MockStorage::new()
            .with_file("guide/setup.md", "# Setup")
            .with_unreadable("guide/secret.md");

        let err = indexer(storage)
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(err.path.as_deref(), Some(Path::new("guide/secret.md")));
    }

    #[test]
    fn test_generate_ignored_unreadable_document_is_not_read() {
        let storage = MockStorage::new()
            .with_file("guide/setup.md", "# Setup")
            .with_unreadable("guide/index.md");

        let node = indexer(storage)
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap();

        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_generate_rejects_traversal() {
        let storage = MockStorage::new();

        let err = indexer(storage)
            .generate(&Locale::Root, "../secrets", &SidebarOptions::new("Guide"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_generate_on_filesystem() {
        let temp_dir = tempfile::tempdir().unwrap();
        let guide = temp_dir.path().join("zh/guide");
        fs::create_dir_all(&guide).unwrap();
        fs::write(guide.join("index.md"), "# 指南").unwrap();
        fs::write(guide.join("setup.md"), "no heading").unwrap();
        fs::write(guide.join("build.md"), "intro\n\n# 构建\n").unwrap();
        fs::create_dir(guide.join("assets.md")).unwrap();

        let indexer = NavigationIndexer::new(Arc::new(FsStorage::new(temp_dir.path())));
        let node = indexer
            .generate(&Locale::parse("zh"), "guide", &SidebarOptions::new("指南"))
            .unwrap();

        let mut children = node.children;
        children.sort_by(|a, b| a.link.cmp(&b.link));
        assert_eq!(
            children,
            vec![link("构建", "/zh/guide/build"), link("setup", "/zh/guide/setup")]
        );
    }

    #[test]
    fn test_generate_on_filesystem_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();

        let indexer = NavigationIndexer::new(Arc::new(FsStorage::new(temp_dir.path())));
        let err = indexer
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_generate_on_filesystem_non_utf8_name_fails() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let guide = temp_dir.path().join("guide");
        fs::create_dir(&guide).unwrap();
        fs::write(guide.join("a.md"), "# A").unwrap();
        fs::write(guide.join(OsStr::from_bytes(b"b\xff.md")), "# B").unwrap();

        let indexer = NavigationIndexer::new(Arc::new(FsStorage::new(temp_dir.path())));
        let err = indexer
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_generate_on_filesystem_invalid_utf8_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let guide = temp_dir.path().join("guide");
        fs::create_dir(&guide).unwrap();
        fs::write(guide.join("caf.md"), b"# Caf\xe9\n").unwrap();

        let indexer = NavigationIndexer::new(Arc::new(FsStorage::new(temp_dir.path())));
        let node = indexer
            .generate(&Locale::Root, "guide", &SidebarOptions::new("Guide"))
            .unwrap();

        assert_eq!(node.children, vec![link("Caf\u{fffd}", "/guide/caf")]);
    }

    #[test]
    fn test_document_link() {
        assert_eq!(document_link("", "guide", "setup"), "/guide/setup");
        assert_eq!(document_link("/zh", "guide", "setup"), "/zh/guide/setup");
        assert_eq!(document_link("/zh", "", "setup"), "/zh/setup");
    }
}
