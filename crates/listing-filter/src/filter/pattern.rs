//! Compiled name patterns.

use regex::{Regex, RegexBuilder};

use super::error::{FilterError, FilterResult};

/// A compiled name filter.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
    as_regexp: bool,
    case_insensitive: bool,
}

impl NamePattern {
    /// Compiles the name filter text.
    ///
    /// Returns `Ok(None)` for empty text, which matches every name. Without
    /// `as_regexp` the text is prefixed with `^` and otherwise left unescaped.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] if the resulting expression does
    /// not compile.
    pub fn compile(text: &str, as_regexp: bool, case_insensitive: bool) -> FilterResult<Option<Self>> {
        if text.is_empty() {
            return Ok(None);
        }

        let source = if as_regexp {
            text.to_string()
        } else {
            format!("^{text}")
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| FilterError::invalid_pattern(source.as_str(), e))?;

        Ok(Some(Self {
            regex,
            as_regexp,
            case_insensitive,
        }))
    }

    /// Returns true if the pattern matches somewhere in `name`.
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The expression actually compiled, including the `^` anchor in plain mode.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the text was used as a regular expression.
    pub fn is_regexp(&self) -> bool {
        self.as_regexp
    }

    /// Whether letters match regardless of case.
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
            && self.as_regexp == other.as_regexp
            && self.case_insensitive == other.case_insensitive
    }
}
