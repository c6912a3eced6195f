//! Renderer configuration.

use regex::Regex;

/// Matches tag names that render as single (void) tags.
#[derive(Debug, Clone)]
pub enum TagPattern {
    /// Exact tag name, compared case-insensitively.
    Name(String),
    /// Regular expression over the tag name.
    Pattern(Regex),
}

impl TagPattern {
    /// Single-tag entry by exact (case-insensitive) name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub(crate) fn matches(&self, tag: &str) -> bool {
        match self {
            Self::Name(name) => name.eq_ignore_ascii_case(tag),
            Self::Pattern(pattern) => pattern.is_match(tag),
        }
    }
}

/// How single tags are closed in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClosingSingleTag {
    /// HTML style, just the opening tag: `<br>`.
    #[default]
    Default,
    /// XML self-closing style: `<br />`.
    Slash,
    /// Explicit closing tag: `<br></br>`.
    Tag,
}

/// Options for [`render`](crate::render).
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Additional single tags on top of the standard set.
    pub single_tags: Vec<TagPattern>,
    /// Closing style for single tags.
    pub closing_single_tag: ClosingSingleTag,
}

impl RenderOptions {
    /// Options with the standard single-tag set and HTML-style closing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-tag entry.
    #[must_use]
    pub fn with_single_tag(mut self, pattern: TagPattern) -> Self {
        self.single_tags.push(pattern);
        self
    }

    /// Set the closing style for single tags.
    #[must_use]
    pub fn with_closing_single_tag(mut self, style: ClosingSingleTag) -> Self {
        self.closing_single_tag = style;
        self
    }
}
