//! Error types for filter criteria.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while building filter criteria.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The name filter text does not compile as a regular expression.
    #[error("invalid name pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern source that failed to compile.
        pattern: String,
        /// Why the regex engine rejected it.
        reason: String,
    },

    /// An option name that is not one of the persisted filter options.
    #[error("unknown filter option: {name}")]
    UnknownOption {
        /// The unrecognized name.
        name: String,
    },
}

impl FilterError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        FilterError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an unknown option error.
    pub fn unknown_option(name: impl Into<String>) -> Self {
        FilterError::UnknownOption { name: name.into() }
    }
}
