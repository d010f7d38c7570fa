//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! A configuration names the docs root, the locales the site is served in,
//! and the sidebar sections to index for every locale:
//!
//! ```toml
//! [docs]
//! root = "docs"
//! root_locale_dir = "en"
//!
//! [[locales]]
//! code = "root"
//! label = "English"
//!
//! [[locales]]
//! code = "zh"
//! label = "简体中文"
//!
//! [[sections]]
//! dir = "guide"
//! title = "Guide"
//! titles = { zh = "指南" }
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `docs.root` and `docs.root_locale_dir` support `${VAR}`,
//! `${VAR:-default}` and a leading `~`.

mod expand;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Locale code of the default locale, served at the site root.
pub const ROOT_LOCALE: &str = "root";

/// File excluded from every section unless `ignore` says otherwise.
pub const DEFAULT_IGNORE: &str = "index.md";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Locales in sidebar order.
    pub locales: Vec<LocaleConfig>,
    /// Sidebar sections in display order.
    pub sections: Vec<SectionConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    root: Option<String>,
    root_locale_dir: Option<String>,
}

/// Resolved documentation configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Directory holding one subdirectory per named locale.
    pub root: PathBuf,
    /// Subdirectory of `root` holding the default locale's sections.
    ///
    /// `None` means the default locale's sections live directly in `root`.
    pub root_locale_dir: Option<String>,
}

/// One locale the site is served in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocaleConfig {
    /// Locale code (`"root"` for the default locale, e.g. `"zh"` otherwise).
    pub code: String,
    /// Human readable name shown in the locale switcher.
    #[serde(default)]
    pub label: Option<String>,
}

impl LocaleConfig {
    /// Whether this is the default locale.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.code == ROOT_LOCALE
    }
}

/// How entries of a section are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionOrder {
    /// Order returned by the directory listing.
    #[default]
    Listing,
    /// Sorted by file name.
    Name,
}

/// One sidebar section, indexed for every locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionConfig {
    /// Section directory relative to the locale directory.
    pub dir: String,
    /// Section label.
    pub title: String,
    /// Per-locale label overrides keyed by locale code.
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
    /// Whether the section starts collapsed.
    #[serde(default)]
    pub collapsible: bool,
    /// File names to leave out of the section.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    /// Entry ordering.
    #[serde(default)]
    pub order: SectionOrder,
}

impl SectionConfig {
    /// Label for the given locale code, falling back to `title`.
    #[must_use]
    pub fn title_for(&self, locale: &str) -> &str {
        self.titles.get(locale).map_or(self.title.as_str(), String::as_str)
    }
}

fn default_ignore() -> Vec<String> {
    vec![DEFAULT_IGNORE.to_owned()]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.root`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        if let Some(discovered) = Self::discover_config() {
            return Self::load_from_file(&discovered);
        }

        tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
        Ok(Self::default_with_cwd())
    }

    /// Parse configuration from a TOML string, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    ///
    /// The default has a single root locale and no sections.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            locales: vec![root_locale()],
            sections: Vec::new(),
            docs_resolved: DocsConfig {
                root: base.join("docs"),
                root_locale_dir: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            locales = config.locales.len(),
            sections = config.sections.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// A file with no `[[locales]]` serves only the default locale.
    fn apply_defaults(&mut self) {
        if self.locales.is_empty() {
            self.locales.push(root_locale());
        }
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_locales()?;
        self.validate_sections()?;
        Ok(())
    }

    /// Validate locale list.
    fn validate_locales(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::Validation(
                "at least one locale is required".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for locale in &self.locales {
            require_non_empty(&locale.code, "locales.code")?;
            if locale.code.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "locales.code '{}' cannot contain '/'",
                    locale.code
                )));
            }
            if !seen.insert(locale.code.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate locale '{}'",
                    locale.code
                )));
            }
        }

        Ok(())
    }

    /// Validate section list.
    fn validate_sections(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            require_non_empty(&section.dir, "sections.dir")?;
            require_non_empty(&section.title, "sections.title")?;
            if !seen.insert(section.dir.trim_matches('/')) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section '{}'",
                    section.dir
                )));
            }
            if let Some(code) = section
                .titles
                .keys()
                .find(|code| !self.locales.iter().any(|l| &l.code == *code))
            {
                return Err(ConfigError::Validation(format!(
                    "section '{}' has a title for unknown locale '{code}'",
                    section.dir
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in path settings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.docs.root {
            self.docs.root = Some(expand::expand_path(root, "docs.root")?);
        }
        if let Some(ref dir) = self.docs.root_locale_dir {
            self.docs.root_locale_dir =
                Some(expand::expand_path(dir, "docs.root_locale_dir")?);
        }
        Ok(())
    }

    /// Resolve the docs root against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            root: config_dir.join(self.docs.root.as_deref().unwrap_or("docs")),
            root_locale_dir: self
                .docs
                .root_locale_dir
                .clone()
                .filter(|dir| !dir.is_empty()),
        };
    }
}

fn root_locale() -> LocaleConfig {
    LocaleConfig {
        code: ROOT_LOCALE.to_owned(),
        label: None,
    }
}
