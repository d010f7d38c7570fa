//! Sidebar navigation for markdown documentation sites.
//!
//! Derives a documentation site's sidebar from the documents already on
//! disk: every `.md` file of a section directory becomes one link, titled by
//! its first `# ` heading and addressed by a locale-correct URL.
//!
//! The crate provides:
//! - [`NavigationIndexer`] which indexes one section into a [`NavigationNode`]
//! - [`build_site_navigation`] which indexes every configured locale and section
//! - [`Locale`] which maps a locale to its content directory and link prefix
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docnav_sidebar::{Locale, NavigationIndexer, SidebarOptions};
//! use docnav_storage::FsStorage;
//!
//! let indexer = NavigationIndexer::new(Arc::new(FsStorage::new("docs")))
//!     .with_root_locale_dir("en");
//! let guide = indexer.generate(&Locale::parse("zh"), "guide", &SidebarOptions::new("指南"))?;
//! assert!(guide.children.iter().all(|c| c.link.starts_with("/zh/guide/")));
//! ```

mod indexer;
mod locale;
mod navigation;
mod site;
mod title;

pub use indexer::{DOCUMENT_EXTENSION, NavigationIndexer};
pub use locale::Locale;
pub use navigation::{EntryOrder, NavLink, NavigationNode, SidebarOptions};
pub use site::{LocaleSidebar, SiteNavigation, build_site_navigation};
pub use title::{document_title, extract_title};
