//! Locale handling.
//!
//! The default locale is served at the site root, every other locale under
//! `/{code}/`. Links must follow the same layout or navigation breaks for
//! non-default locales.

use std::fmt;
use std::path::PathBuf;

use docnav_config::ROOT_LOCALE;

/// A locale the site is served in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
    /// The default locale, served at the site root without a prefix.
    Root,
    /// Any other locale, served under `/{code}/`.
    Named(String),
}

impl Locale {
    /// Parse a locale code. `"root"` and `""` denote the default locale.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        if code.is_empty() || code == ROOT_LOCALE {
            Self::Root
        } else {
            Self::Named(code.to_owned())
        }
    }

    /// Whether this is the default locale.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Locale code (`"root"` for the default locale).
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Root => ROOT_LOCALE,
            Self::Named(code) => code,
        }
    }

    /// Prefix prepended to every link: `""` or `"/{code}"`.
    #[must_use]
    pub fn link_prefix(&self) -> String {
        match self {
            Self::Root => String::new(),
            Self::Named(code) => format!("/{code}"),
        }
    }

    /// Key of this locale's sidebar in the renderer config: `"/"` or `"/{code}/"`.
    #[must_use]
    pub fn sidebar_key(&self) -> String {
        format!("{}/", self.link_prefix())
    }

    /// Directory holding this locale's sections, relative to the docs root.
    ///
    /// Named locales live in `{code}/`. The default locale lives in
    /// `root_dir` if one is configured, otherwise directly in the docs root.
    #[must_use]
    pub fn content_dir(&self, root_dir: Option<&str>) -> PathBuf {
        match self {
            Self::Root => root_dir.map(PathBuf::from).unwrap_or_default(),
            Self::Named(code) => PathBuf::from(code),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}
