//! Site configuration: where the dashboard lives, which tables to read and
//! how their columns are laid out.

use crate::error::*;
use std::time::Duration;

const DEFAULT_SITE_TOML: &'static str = include_str!("../config/site.toml");

/// Everything a scrape invocation needs to know about the source site.
#[derive(Debug, Clone)]
#[derive(Deserialize)]
pub struct SiteConfig {
    pub url: String,
    /// Element ids of the results tables, in extraction order.
    pub table_ids: Vec<String>,
    /// Element ids that must be present before fetched HTML is trusted.
    pub required_ids: Vec<String>,
    pub timeout_secs: u64,
    pub columns: ColumnLayout,
}

/// Logical field -> column index mapping for the results tables.
///
/// The dashboard carries extra display-only columns between these; a layout
/// change on the site is a one-place edit here (or in a config file) rather
/// than a magic number hunt.
#[derive(Debug, Clone, Copy)]
#[derive(Deserialize)]
pub struct ColumnLayout {
    pub port: usize,
    pub commercial: usize,
    pub passenger: usize,
    pub pedestrian: usize,
}

impl SiteConfig {
    /// Load a configuration from a TOML document.
    #[inline]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).chain_err(|| "failed to parse site config")
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SiteConfig {
    /// The live dashboard, as embedded from `config/site.toml`.
    fn default() -> Self {
        // The file is embedded at compile time; failing to parse it is a
        // programming error.
        toml::from_str(DEFAULT_SITE_TOML).unwrap()
    }
}
