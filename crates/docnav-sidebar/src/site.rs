//! Site-wide sidebar assembly.
//!
//! Runs the [`NavigationIndexer`] for every configured locale and section and
//! collects the results into a [`SiteNavigation`], keyed the way the site
//! renderer expects locale sidebars: `"/"` for the default locale and
//! `"/{code}/"` for the others.

use docnav_config::Config;
use docnav_storage::StorageError;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::indexer::NavigationIndexer;
use crate::locale::Locale;
use crate::navigation::{NavigationNode, SidebarOptions};

/// Sidebar of one locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleSidebar {
    /// Locale these sections belong to.
    pub locale: Locale,
    /// Human readable locale name, if configured.
    pub label: Option<String>,
    /// Sections in configuration order.
    pub sections: Vec<NavigationNode>,
}

/// Sidebars of every locale, in configuration order.
///
/// Serializes to a map from sidebar key to sections:
///
/// ```json
/// { "/": [{ "text": "Guide", ... }], "/zh/": [{ "text": "指南", ... }] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteNavigation {
    locales: Vec<LocaleSidebar>,
}

impl SiteNavigation {
    /// Sections of `locale`, if it was configured.
    #[must_use]
    pub fn get(&self, locale: &Locale) -> Option<&[NavigationNode]> {
        self.locales
            .iter()
            .find(|sidebar| &sidebar.locale == locale)
            .map(|sidebar| sidebar.sections.as_slice())
    }

    /// Locale sidebars in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &LocaleSidebar> {
        self.locales.iter()
    }

    /// Number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Whether no locale was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl Serialize for SiteNavigation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.locales.len()))?;
        for sidebar in &self.locales {
            map.serialize_entry(&sidebar.locale.sidebar_key(), &sidebar.sections)?;
        }
        map.end()
    }
}

/// Index every configured section for every configured locale.
///
/// Section labels use the per-locale override when one is configured.
///
/// # Errors
///
/// Returns the first [`StorageError`] hit; no partial navigation is returned.
pub fn build_site_navigation(
    indexer: &NavigationIndexer,
    config: &Config,
) -> Result<SiteNavigation, StorageError> {
    let mut locales = Vec::with_capacity(config.locales.len());

    for locale_config in &config.locales {
        let locale = Locale::parse(&locale_config.code);
        let sections = config
            .sections
            .iter()
            .map(|section| {
                let options = SidebarOptions::new(section.title_for(&locale_config.code))
                    .collapsible(section.collapsible)
                    .ignore(section.ignore.iter().cloned())
                    .order(section.order.into());
                indexer.generate(&locale, &section.dir, &options)
            })
            .collect::<Result<Vec<_>, _>>()?;

        locales.push(LocaleSidebar {
            locale,
            label: locale_config.label.clone(),
            sections,
        });
    }

    tracing::info!(
        locales = locales.len(),
        sections = config.sections.len(),
        "Built site navigation"
    );

    Ok(SiteNavigation { locales })
}
