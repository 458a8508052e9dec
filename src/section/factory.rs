//! Factory functions that assemble section trees.
//!
//! These are the only place trees get built: template sections, intrinsic
//! helpers and catalog entries all go through them.

use std::fmt::Display;

use crate::section::components::*;
use crate::section::traits::*;

/// Separator between top-level document sections
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// A section that outputs `value` unchanged.
pub fn plain(value: impl Into<String>) -> Section {
    PlainText::new(value).into_section()
}

/// One plain section per string, in order.
pub fn plain_strings<I, S>(values: I) -> Vec<Section>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(plain).collect()
}

/// A single `key: value` line.
pub fn single_line(key: impl Into<String>, value: impl Display) -> Section {
    KeyValueLine::new(key, value).into_section()
}

/// One `key: value` line per entry, in iteration order.
pub fn key_value_map<I, K, V>(entries: I) -> Vec<Section>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Display,
{
    entries
        .into_iter()
        .map(|(key, value)| single_line(key, value))
        .collect()
}

/// Children joined by a newline.
pub fn aggregating(children: Vec<Section>) -> Section {
    Aggregate::new(children).into_section()
}

/// Children joined by `separator`.
pub fn aggregating_with(children: Vec<Section>, separator: &str) -> Section {
    Aggregate::with_separator(children, separator).into_section()
}

/// Present children joined by a newline; `None` entries are skipped.
pub fn aggregating_present(children: impl IntoIterator<Item = Option<Section>>) -> Section {
    Aggregate::from_optional(children).into_section()
}

/// A mapping key whose value is the aggregation of `children`.
pub fn titled(title: impl Into<String>, children: Vec<Section>) -> Section {
    TitledBlock::new(title, aggregating(children)).into_section()
}

/// A mapping key over a single body.
pub fn titled_one(title: impl Into<String>, body: Section) -> Section {
    TitledBlock::new(title, body).into_section()
}

/// One sequence entry whose content is the aggregation of `children`.
pub fn list_item(children: Vec<Section>) -> Section {
    ListItem::new(aggregating(children)).into_section()
}

/// A YAML sequence with each item wrapped as its own entry.
pub fn list_of(items: impl IntoIterator<Item = Section>) -> Section {
    aggregating(
        items
            .into_iter()
            .map(|item| ListItem::new(item).into_section())
            .collect(),
    )
}

/// Top-level document: sections separated by a blank line.
pub fn document(sections: Vec<Section>) -> Section {
    aggregating_with(sections, DOCUMENT_SEPARATOR)
}
