//! Various modules for getting data out of the dashboard's HTML.

pub mod wait_times;

use scraper::Selector;
use std::collections::HashMap;

/// Turns an embedded TOML table of named CSS selectors into parsed selectors.
///
/// Panics on a malformed file or selector; the selector files are embedded
/// at compile time, so that is a programming error.
pub(crate) fn load_sels(toml_str: &str) -> HashMap<String, Selector> {
    let table: HashMap<String, String> = toml::from_str(toml_str).unwrap();

    table.into_iter()
         .map(|(name, sel)| (name, Selector::parse(&sel).unwrap()))
         .collect()
}
