//! Placeholder substitution.
//!
//! Scans the template left to right for `{{NAME}}` placeholders and replaces
//! each one whose inner text has a mapping table entry. The inner text is
//! looked up verbatim, surrounding whitespace included. Unrecognized
//! placeholders are left untouched, and replacement values are never
//! re-scanned.

use super::mapping::MappingTable;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").unwrap());

/// Substitute mapping table entries into a template.
pub fn substitute(template: &str, table: &MappingTable) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match table.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
