//! Parser configuration.

use regex::Regex;

/// A directive filter for declarations (`<!NAME …>`) and processing
/// instructions (`<?NAME …?>`).
///
/// Parsed directive names come in the form `!name` for declarations and
/// `?name` for instructions. Only directives matching a filter are kept in
/// the tree (as text nodes); the rest are dropped.
#[derive(Debug, Clone)]
pub enum Directive {
    /// Exact name, compared case-insensitively.
    Name(String),
    /// Regular expression over the parsed name. Case-insensitivity is the
    /// pattern author's choice (use `(?i)`).
    Pattern(Regex),
}

impl Directive {
    /// Directive filter by exact (case-insensitive) name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub(crate) fn matches(&self, token: &str) -> bool {
        match self {
            Self::Name(name) => name.eq_ignore_ascii_case(token),
            Self::Pattern(pattern) => pattern.is_match(token),
        }
    }
}

/// Options for [`parse`](crate::parse).
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Directives to keep in the tree. Defaults to the `!doctype`
    /// declaration only.
    pub directives: Vec<Directive>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            directives: vec![Directive::name("!doctype")],
        }
    }
}

impl ParseOptions {
    /// Options with the default directive set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directive filter.
    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_match_is_case_insensitive() {
        let directive = Directive::name("!doctype");
        assert!(directive.matches("!DOCTYPE"));
        assert!(directive.matches("!doctype"));
        assert!(!directive.matches("?doctype"));
    }

    #[test]
    fn test_pattern_match() {
        let directive = Directive::Pattern(Regex::new(r"^\?php").unwrap());
        assert!(directive.matches("?php"));
        assert!(!directive.matches("!php"));
    }
}
