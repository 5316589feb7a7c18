//! Cookie-backed preference storage.
//!
//! Preferences are plain `name=value` strings kept in a cookie jar. Values are
//! percent-encoded on write and decoded on read, so reserved characters such
//! as `;`, `=` and spaces survive a round trip.
//!
//! - [`CookieJar`] emulates a browser cookie string in memory.
//! - [`CookieFile`] persists a jar as JSON under the user's data directory.
//! - [`PersistentCookieJar`] combines the two and saves after every write.
//!
//! # Example
//!
//! ```
//! use listing_filter::{CookieJar, CookieOptions};
//!
//! let mut jar = CookieJar::new();
//! jar.set("greeting", Some("a; b=c"), &CookieOptions::default());
//! assert_eq!(jar.cookie_string(), "greeting=a%3B%20b%3Dc");
//! assert_eq!(jar.get("greeting").as_deref(), Some("a; b=c"));
//!
//! jar.set("greeting", None, &CookieOptions::default());
//! assert_eq!(jar.get("greeting"), None);
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

mod cookie;
mod store;

pub use cookie::{
    decode_uri_component, encode_uri_component, Cookie, CookieJar, CookieOptions, Expiry,
};
pub use store::{CookieFile, PersistentCookieJar};

/// Errors that can occur while persisting preferences.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Failed to determine the data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read cookie file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write cookie file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create cookie directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file delete.
    #[error("failed to delete cookie file '{path}': {source}")]
    DeleteError {
        /// The path that failed to delete.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for preference operations.
pub type Result<T> = std::result::Result<T, PrefsError>;

/// Named string preferences with optional expiry.
pub trait PreferenceStore {
    /// Returns the decoded value stored under `name`, or `None` if absent.
    fn get(&self, name: &str) -> Option<String>;

    /// Stores `value` under `name`. `None` deletes the preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the change.
    fn set(&mut self, name: &str, value: Option<&str>, options: &CookieOptions) -> Result<()>;
}

impl PreferenceStore for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        CookieJar::get(self, name)
    }

    fn set(&mut self, name: &str, value: Option<&str>, options: &CookieOptions) -> Result<()> {
        CookieJar::set(self, name, value, options);
        Ok(())
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &mut T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&mut self, name: &str, value: Option<&str>, options: &CookieOptions) -> Result<()> {
        (**self).set(name, value, options)
    }
}
