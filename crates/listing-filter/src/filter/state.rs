//! In-memory filter criteria.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::FilterError;
use super::pattern::NamePattern;
use crate::page::ListItem;

/// The boolean name-filter options persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterOption {
    /// Match names regardless of letter case.
    IgnoreCase,
    /// Use the name filter text as a regular expression instead of a prefix.
    AsRegExp,
}

impl FilterOption {
    /// Every option, in the order the page lists them.
    pub const ALL: [FilterOption; 2] = [FilterOption::IgnoreCase, FilterOption::AsRegExp];

    /// Name under which the option is stored in the cookie string.
    pub fn cookie_name(&self) -> &'static str {
        match self {
            FilterOption::IgnoreCase => "filter4NameIgnoreCase",
            FilterOption::AsRegExp => "filter4NameAsRegExp",
        }
    }

    /// Class marker shared by every checkbox bound to this option.
    pub fn checkbox_marker(&self) -> String {
        format!("option_{}_cb", self.cookie_name())
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOption::IgnoreCase => write!(f, "ignore-case"),
            FilterOption::AsRegExp => write!(f, "regex"),
        }
    }
}

impl FromStr for FilterOption {
    type Err = FilterError;

    /// Accepts the short names shown by `Display` as well as the cookie names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOption::ALL
            .into_iter()
            .find(|o| o.to_string() == s || o.cookie_name() == s)
            .ok_or_else(|| FilterError::unknown_option(s))
    }
}

/// Reads a persisted option value.
///
/// Only the exact string `"true"` is true. Missing and unrecognized values are false.
pub fn parse_bool(value: Option<&str>) -> bool {
    matches!(value, Some("true"))
}

/// Active package, kind and name criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    selected_packages: BTreeSet<String>,
    selected_kinds: BTreeSet<String>,
    total_kinds: usize,
    name_pattern: Option<NamePattern>,
    case_insensitive: bool,
    name_as_pattern: bool,
}

impl FilterState {
    /// Creates a state in which every item passes.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Packages
    // =========================================================================

    /// Replaces the selected packages. An empty selection disables the package filter.
    pub fn set_packages<I, S>(&mut self, packages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_packages = packages.into_iter().map(Into::into).collect();
    }

    pub fn selected_packages(&self) -> &BTreeSet<String> {
        &self.selected_packages
    }

    /// Returns true if no package is selected or the item's package is.
    pub fn package_passes(&self, item: &ListItem) -> bool {
        self.selected_packages.is_empty() || self.selected_packages.contains(&item.package)
    }

    // =========================================================================
    // Kinds
    // =========================================================================

    /// Forgets every registered kind.
    pub fn clear_kinds(&mut self) {
        self.selected_kinds.clear();
        self.total_kinds = 0;
    }

    /// Registers a known kind as active and counts it towards the total.
    pub fn register_kind(&mut self, kind: impl Into<String>) {
        if self.selected_kinds.insert(kind.into()) {
            self.total_kinds += 1;
        }
    }

    pub fn is_kind_active(&self, kind: &str) -> bool {
        self.selected_kinds.contains(kind)
    }

    /// Marks a kind active. Returns false if it already was.
    pub fn activate_kind(&mut self, kind: &str) -> bool {
        self.selected_kinds.insert(kind.to_string())
    }

    /// Marks a kind inactive. Returns false if it was not active.
    pub fn deactivate_kind(&mut self, kind: &str) -> bool {
        self.selected_kinds.remove(kind)
    }

    pub fn selected_kinds(&self) -> &BTreeSet<String> {
        &self.selected_kinds
    }

    pub fn total_kinds(&self) -> usize {
        self.total_kinds
    }

    /// Returns true if all known kinds are active or the item's kind is.
    pub fn kind_passes(&self, item: &ListItem) -> bool {
        self.selected_kinds.len() == self.total_kinds || self.selected_kinds.contains(&item.kind)
    }

    // =========================================================================
    // Name
    // =========================================================================

    pub fn set_name_pattern(&mut self, pattern: Option<NamePattern>) {
        self.name_pattern = pattern;
    }

    pub fn name_pattern(&self) -> Option<&NamePattern> {
        self.name_pattern.as_ref()
    }

    /// Returns true if there is no pattern or it matches the item's display name.
    pub fn name_passes(&self, item: &ListItem) -> bool {
        self.name_pattern
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(&item.name))
    }

    // =========================================================================
    // Options
    // =========================================================================

    pub fn option(&self, option: FilterOption) -> bool {
        match option {
            FilterOption::IgnoreCase => self.case_insensitive,
            FilterOption::AsRegExp => self.name_as_pattern,
        }
    }

    pub fn set_option(&mut self, option: FilterOption, value: bool) {
        match option {
            FilterOption::IgnoreCase => self.case_insensitive = value,
            FilterOption::AsRegExp => self.name_as_pattern = value,
        }
    }

    /// Returns true if the item passes the package, kind and name checks.
    pub fn matches(&self, item: &ListItem) -> bool {
        self.package_passes(item) && self.kind_passes(item) && self.name_passes(item)
    }
}
