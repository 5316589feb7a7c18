//! Command implementations for the lf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod kinds;
pub mod list;
pub mod options;
pub mod packages;

use std::path::PathBuf;

use listing_filter::filter::FilterError;
use listing_filter::{CookieFile, CookieOptions, Listing, ListingError, ListingStore, PrefsError};
use strsim::levenshtein;

use crate::cli::Cli;
use config::Config;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Listing file error.
    #[error("listing error: {0}")]
    Listing(#[from] ListingError),

    /// Filter option or pattern error.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Preference storage error.
    #[error("preferences error: {0}")]
    Prefs(#[from] PrefsError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Listing file from `--listing`, `LF_LISTING` or the config file.
    pub listing: Option<PathBuf>,
    /// Cookie file from `--cookies`, `LF_COOKIES` or the config file.
    pub cookies: Option<PathBuf>,
    /// Lifetime of persisted options in days. 0 keeps them for the session only.
    pub remember_days: i64,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Flags and environment variables take priority over config values.
    pub fn new(cli: &Cli, config: &Config) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            listing: cli.listing.clone().or_else(|| config.listing.clone()),
            cookies: cli.cookies.clone().or_else(|| config.cookies.clone()),
            remember_days: config.remember_days(),
        }
    }

    /// Returns the store for the configured listing file.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Config` if no listing file is configured.
    pub fn listing_store(&self) -> Result<ListingStore> {
        self.listing.as_ref().map(ListingStore::new).ok_or_else(|| {
            CommandError::Config(
                "no listing file given. Use --listing, LF_LISTING or 'lf config set listing <FILE>'"
                    .to_string(),
            )
        })
    }

    /// Loads the configured listing.
    pub fn load_listing(&self) -> Result<Listing> {
        Ok(self.listing_store()?.load()?)
    }

    /// Returns the cookie file, falling back to the default data path.
    pub fn cookie_file(&self) -> Result<CookieFile> {
        match &self.cookies {
            Some(path) => Ok(CookieFile::with_path(path.clone())),
            None => Ok(CookieFile::new()?),
        }
    }

    /// Attributes used when persisting options.
    pub fn cookie_options(&self) -> CookieOptions {
        CookieOptions::default().expires_in_days(self.remember_days)
    }
}

/// Formats an "unknown" warning, optionally including a suggestion.
pub fn format_unknown(what: &str, name: &str, suggestion: Option<&str>) -> String {
    let base = format!("unknown {what} '{name}'");
    match suggestion {
        Some(s) => format!("{base}. Did you mean '{s}'?"),
        None => base,
    }
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
pub fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    // A case-only difference has distance 0 and is still suggested
    if best_distance <= MAX_SUGGESTION_DISTANCE && best_match != query {
        Some(best_match)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_similar_name() {
        let packages = ["scala.collection", "scala.collection.mutable", "scala.util"];

        assert_eq!(
            find_similar_name("scala.colection", packages.into_iter()),
            Some("scala.collection".to_string())
        );
        assert_eq!(
            find_similar_name("scala.utils", packages.into_iter()),
            Some("scala.util".to_string())
        );
        assert_eq!(find_similar_name("java.lang", packages.into_iter()), None);
    }

    #[test]
    fn test_find_similar_name_case_only() {
        assert_eq!(
            find_similar_name("Class", ["class", "object"].into_iter()),
            Some("class".to_string())
        );
    }

    #[test]
    fn test_find_similar_name_empty_candidates() {
        assert_eq!(find_similar_name("x", std::iter::empty()), None);
    }

    #[test]
    fn test_format_unknown() {
        assert_eq!(
            format_unknown("package", "p9", Some("p1")),
            "unknown package 'p9'. Did you mean 'p1'?"
        );
        assert_eq!(format_unknown("kind", "enum", None), "unknown kind 'enum'");
    }

    #[test]
    fn test_listing_store_requires_path() {
        let ctx = CommandContext {
            json_output: false,
            use_colors: false,
            quiet: false,
            listing: None,
            cookies: None,
            remember_days: 365,
        };
        let err = ctx.listing_store().unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
        assert!(err.to_string().contains("--listing"));
    }

    #[test]
    fn test_cookie_file_custom_path() {
        let ctx = CommandContext {
            json_output: false,
            use_colors: false,
            quiet: false,
            listing: None,
            cookies: Some(PathBuf::from("/tmp/lf-cookies.json")),
            remember_days: 0,
        };
        let file = ctx.cookie_file().unwrap();
        assert_eq!(file.path(), &PathBuf::from("/tmp/lf-cookies.json"));
    }
}
