use std::fmt::{self, Display};
use std::sync::Arc;

use crate::section::traits::*;

/// Width of one YAML nesting level
pub const INDENT: &str = "  ";

/// Replaces the first indent character of a list item
pub const LIST_MARKER: &str = "-";

pub const DEFAULT_SEPARATOR: &str = "\n";

/// Indents every line of `text` by one nesting level.
///
/// Empty lines become a line holding only the indent, so the number of lines
/// never changes.
pub fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a fixed string verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainText {
    value: String,
}

impl PlainText {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Render for PlainText {
    fn render(&self) -> String {
        self.value.clone()
    }
}

/// Renders a single `key: value` association
///
/// The value is converted with its `Display` implementation; nothing is
/// quoted or escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueLine {
    key: String,
    value: String,
}

impl KeyValueLine {
    pub fn new(key: impl Into<String>, value: impl Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

impl Render for KeyValueLine {
    fn render(&self) -> String {
        format!("{}: {}", self.key, self.value)
    }
}

/// Joins the output of its children with a separator
#[derive(Clone)]
pub struct Aggregate {
    children: Vec<Section>,
    separator: String,
}

impl Aggregate {
    pub fn new(children: Vec<Section>) -> Self {
        Self::with_separator(children, DEFAULT_SEPARATOR)
    }

    pub fn with_separator(children: Vec<Section>, separator: impl Into<String>) -> Self {
        Self {
            children,
            separator: separator.into(),
        }
    }

    /// Builds an aggregate from a full field set, dropping absent entries.
    pub fn from_optional(children: impl IntoIterator<Item = Option<Section>>) -> Self {
        Self::new(children.into_iter().flatten().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }
}

impl Render for Aggregate {
    fn render(&self) -> String {
        self.children
            .iter()
            .map(|child| child.render())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

impl fmt::Debug for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("children", &self.children.len())
            .field("separator", &self.separator)
            .finish()
    }
}

/// A title line followed by its indented body
#[derive(Clone)]
pub struct TitledBlock {
    title: String,
    body: Section,
}

impl TitledBlock {
    pub fn new(title: impl Into<String>, body: Section) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }
}

impl Render for TitledBlock {
    fn render(&self) -> String {
        format!("{}:\n{}", self.title, indent(&self.body.render()))
    }
}

impl fmt::Debug for TitledBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitledBlock")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Renders its body as one YAML sequence entry
///
/// Only the first indent character of the whole output becomes the marker;
/// continuation lines keep the plain indent.
#[derive(Clone)]
pub struct ListItem {
    body: Section,
}

impl ListItem {
    pub fn new(body: Section) -> Self {
        Self { body }
    }
}

impl Render for ListItem {
    fn render(&self) -> String {
        indent(&self.body.render()).replacen(' ', LIST_MARKER, 1)
    }
}

impl fmt::Debug for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListItem").finish_non_exhaustive()
    }
}

/// Renders whatever its closure produces, resolved on every call
///
/// `compute` must be deterministic and free of side effects; a closure that
/// reads a clock or mutable state breaks the [`Render`] contract.
#[derive(Clone)]
pub struct Delegate {
    compute: Arc<dyn Fn() -> Section + Send + Sync>,
}

impl Delegate {
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> Section + Send + Sync + 'static,
    {
        Self {
            compute: Arc::new(compute),
        }
    }
}

impl Render for Delegate {
    fn render(&self) -> String {
        (self.compute)().render()
    }
}

impl fmt::Debug for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate").finish_non_exhaustive()
    }
}
