//! Sidebar navigation types.
//!
//! A [`NavigationNode`] is one labeled sidebar group. It serializes to the
//! sidebar-group shape the site renderer consumes:
//!
//! ```json
//! { "text": "Guide", "collapsed": false, "items": [{ "text": "Setup", "link": "/guide/setup" }] }
//! ```

use docnav_config::{DEFAULT_IGNORE, SectionOrder};
use serde::Serialize;

/// One sidebar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display title.
    pub text: String,
    /// Link target path.
    pub link: String,
}

/// One sidebar section: a label and its links.
///
/// Built fresh by every [`generate`](crate::NavigationIndexer::generate) call
/// and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationNode {
    /// Section label.
    #[serde(rename = "text")]
    pub label: String,
    /// Display hint for the renderer.
    #[serde(rename = "collapsed")]
    pub collapsed_by_default: bool,
    /// One link per indexed document.
    #[serde(rename = "items")]
    pub children: Vec<NavLink>,
}

/// Order of the links in a section.
///
/// `Listing` depends on how the platform enumerates the directory; use
/// numeric file name prefixes or `Name` when a stable order matters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryOrder {
    /// Keep the order returned by the directory listing.
    #[default]
    Listing,
    /// Sort by file name (byte order).
    Name,
}

impl From<SectionOrder> for EntryOrder {
    fn from(order: SectionOrder) -> Self {
        match order {
            SectionOrder::Listing => Self::Listing,
            SectionOrder::Name => Self::Name,
        }
    }
}

/// Options for indexing one section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarOptions {
    /// Label of the resulting node.
    pub title: String,
    /// Whether the node starts collapsed.
    pub collapsible: bool,
    /// File names left out even if they are documents.
    pub ignore: Vec<String>,
    /// Link order.
    pub order: EntryOrder,
}

impl SidebarOptions {
    /// Options with the given label and defaults for everything else:
    /// expanded, `index.md` ignored, listing order.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            collapsible: false,
            ignore: vec![DEFAULT_IGNORE.to_owned()],
            order: EntryOrder::Listing,
        }
    }

    /// Set the collapsed display hint.
    #[must_use]
    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Replace the ignore list.
    #[must_use]
    pub fn ignore<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.ignore = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the link order.
    #[must_use]
    pub fn order(mut self, order: EntryOrder) -> Self {
        self.order = order;
        self
    }

    /// Whether `file_name` is excluded.
    pub(crate) fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore.iter().any(|name| name == file_name)
    }
}
