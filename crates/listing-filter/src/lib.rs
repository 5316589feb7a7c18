//! Package, kind and name filtering for static listing pages.
//!
//! This crate models a pre-rendered listing (for example a class or API index)
//! and the controls that narrow it down: a package multi-select, one toggle per
//! item kind, a name filter that matches by prefix or regular expression, and a
//! pair of boolean options persisted in a cookie string.
//!
//! # Example
//!
//! ```
//! use listing_filter::{CookieJar, FilterController, ListItem, Listing};
//!
//! let listing = Listing::from_items(vec![
//!     ListItem::new("Alpha", "p1", "class"),
//!     ListItem::new("Beta", "p2", "interface"),
//! ]);
//!
//! let mut controller = FilterController::new(listing.into_page(), CookieJar::new());
//! controller.initialize();
//! controller.select_package("p1");
//!
//! let names: Vec<&str> = controller.visible_items().map(|i| i.name.as_str()).collect();
//! assert_eq!(names, vec!["Alpha"]);
//! ```

use serde::{Deserialize, Serialize};

pub mod controller;
pub mod debounce;
pub mod filter;
pub mod page;
pub mod prefs;
mod store;

pub use controller::FilterController;
pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use page::{KindToggle, ListItem, OptionCheckbox, PackageSelect, Page, SelectOption};
pub use prefs::{
    CookieFile, CookieJar, CookieOptions, Expiry, PersistentCookieJar, PreferenceStore,
    PrefsError,
};
pub use store::{ListingError, ListingStore};

/// A listing as stored on disk.
///
/// `packages` and `kinds` are optional in the file. When they are absent the
/// known values are derived from the items in first-seen order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Listing {
    /// Page title shown above the listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Package labels offered by the package multi-select.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,

    /// Kinds offered as toggles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kinds: Vec<String>,

    /// Listed entries in display order.
    #[serde(default)]
    pub items: Vec<ListItem>,
}

impl Listing {
    /// Creates a listing with derived packages and kinds.
    pub fn from_items(items: Vec<ListItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Returns the package labels, explicit ones first, otherwise as they appear on items.
    pub fn known_packages(&self) -> Vec<&str> {
        if !self.packages.is_empty() {
            return self.packages.iter().map(String::as_str).collect();
        }
        distinct(self.items.iter().map(|i| i.package.as_str()))
    }

    /// Returns the kinds, explicit ones first, otherwise as they appear on items.
    pub fn known_kinds(&self) -> Vec<&str> {
        if !self.kinds.is_empty() {
            return self.kinds.iter().map(String::as_str).collect();
        }
        distinct(self.items.iter().map(|i| i.kind.as_str()))
    }

    /// Number of items per known package, in known-package order.
    pub fn package_counts(&self) -> Vec<(&str, usize)> {
        self.known_packages()
            .into_iter()
            .map(|p| (p, self.items.iter().filter(|i| i.package == p).count()))
            .collect()
    }

    /// Number of items per known kind, in known-kind order.
    pub fn kind_counts(&self) -> Vec<(&str, usize)> {
        self.known_kinds()
            .into_iter()
            .map(|k| (k, self.items.iter().filter(|i| i.kind == k).count()))
            .collect()
    }

    /// Builds the page controls and item collection for this listing.
    pub fn into_page(self) -> Page {
        let packages = self.known_packages().into_iter().map(String::from).collect();
        let kinds = self.known_kinds().into_iter().map(String::from).collect();
        Page::new(packages, kinds, self.items)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
