//! Listing file storage.
//!
//! A listing is a JSON document holding the items of one page. Both
//! synchronous (`std::fs`) and asynchronous (`tokio::fs`) loaders are
//! provided.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::Listing;

/// Errors that can occur while reading listing files.
#[derive(Debug, Error)]
pub enum ListingError {
    /// I/O error during file read.
    #[error("failed to read listing file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An item is missing one of its required fields.
    #[error("listing item {index} has an empty {field}")]
    InvalidItem {
        /// Zero-based position of the item in the listing.
        index: usize,
        /// Name of the empty field.
        field: &'static str,
    },
}

/// Result type for listing operations.
pub type Result<T> = std::result::Result<T, ListingError>;

/// Reads a listing JSON file.
#[derive(Debug, Clone)]
pub struct ListingStore {
    path: PathBuf,
}

impl ListingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the listing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the listing.
    ///
    /// # Errors
    ///
    /// - Returns `ListingError::ReadError` if the file cannot be read.
    /// - Returns `ListingError::Json` if the file contains invalid JSON.
    /// - Returns `ListingError::InvalidItem` if an item has an empty name, package or kind.
    pub fn load(&self) -> Result<Listing> {
        let contents = fs::read_to_string(&self.path).map_err(|e| ListingError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        self.parse(&contents)
    }

    /// Async equivalent of [`load()`](Self::load).
    ///
    /// # Errors
    ///
    /// Same as [`load()`](Self::load).
    pub async fn load_async(&self) -> Result<Listing> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| ListingError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })?;
        self.parse(&contents)
    }

    fn parse(&self, contents: &str) -> Result<Listing> {
        let listing: Listing = serde_json::from_str(contents)?;
        validate(&listing)?;
        debug!(
            path = %self.path.display(),
            items = listing.items.len(),
            "loaded listing"
        );
        Ok(listing)
    }
}

fn validate(listing: &Listing) -> Result<()> {
    for (index, item) in listing.items.iter().enumerate() {
        let field = if item.name.is_empty() {
            "name"
        } else if item.package.is_empty() {
            "package"
        } else if item.kind.is_empty() {
            "kind"
        } else {
            continue;
        };
        return Err(ListingError::InvalidItem { index, field });
    }
    Ok(())
}
