//! The control surface of a listing page.
//!
//! [`Page`] holds everything the filter controller reads from or writes to:
//! the package multi-select, one toggle per kind with its paired checkbox,
//! the option checkboxes, the name input and the list items themselves.

use serde::{Deserialize, Serialize};

use crate::filter::FilterOption;

/// One entry of the listing.
///
/// Items are created once when the page is built. Only `visible` changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Display name (the text of the item's link).
    pub name: String,

    /// Package the item belongs to.
    pub package: String,

    /// Kind label such as `class` or `interface`.
    pub kind: String,

    /// Whether the item is currently shown.
    #[serde(skip, default = "shown")]
    pub visible: bool,
}

fn shown() -> bool {
    true
}

impl ListItem {
    /// Creates a visible item.
    pub fn new(name: impl Into<String>, package: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind: kind.into(),
            visible: true,
        }
    }
}

/// An entry of the package multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Option text, matched against item packages.
    pub text: String,
    /// Whether the option is selected.
    pub selected: bool,
}

/// The package multi-select control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSelect {
    options: Vec<SelectOption>,
}

impl PackageSelect {
    /// Creates a select with one unselected option per package.
    pub fn new(packages: Vec<String>) -> Self {
        let options = packages
            .into_iter()
            .map(|text| SelectOption {
                text,
                selected: false,
            })
            .collect();
        Self { options }
    }

    /// All options in display order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Texts of the selected options.
    pub fn selected_texts(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.text.clone())
            .collect()
    }

    /// Sets the selection state of every option with the given text.
    ///
    /// Returns false when no option has that text.
    pub fn set_selected(&mut self, text: &str, selected: bool) -> bool {
        let mut found = false;
        for option in self.options.iter_mut().filter(|o| o.text == text) {
            option.selected = selected;
            found = true;
        }
        found
    }

    /// Selects the options whose text equals `text` and deselects the rest.
    ///
    /// Leaves the selection untouched and returns false when no option matches.
    pub fn select_only(&mut self, text: &str) -> bool {
        if !self.options.iter().any(|o| o.text == text) {
            return false;
        }
        for option in &mut self.options {
            option.selected = option.text == text;
        }
        true
    }

    /// Deselects every option.
    pub fn clear_selection(&mut self) {
        for option in &mut self.options {
            option.selected = false;
        }
    }
}

/// A clickable kind control with its paired checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindToggle {
    kind: String,
    checked: bool,
}

impl KindToggle {
    /// Creates a checked toggle for `kind`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            checked: true,
        }
    }

    /// The kind this toggle controls.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Whether the paired checkbox is checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Element id of the toggle, `filter_<kind>`.
    pub fn id(&self) -> String {
        format!("filter_{}", self.kind)
    }

    /// Element id of the paired checkbox, `filter_<kind>_cb`.
    pub fn checkbox_id(&self) -> String {
        format!("filter_{}_cb", self.kind)
    }
}

/// A checkbox bound to a persisted option through its class marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCheckbox {
    /// Class marker, `option_<name>_cb`.
    pub marker: String,
    /// Whether the checkbox is checked.
    pub checked: bool,
}

/// All controls and items of one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    packages: PackageSelect,
    kind_toggles: Vec<KindToggle>,
    option_checkboxes: Vec<OptionCheckbox>,
    name_input: String,
    items: Vec<ListItem>,
}

impl Page {
    /// Builds a page with one checkbox per persisted option.
    pub fn new(packages: Vec<String>, kinds: Vec<String>, items: Vec<ListItem>) -> Self {
        let option_checkboxes = FilterOption::ALL
            .iter()
            .map(|option| OptionCheckbox {
                marker: option.checkbox_marker(),
                checked: false,
            })
            .collect();

        Self {
            packages: PackageSelect::new(packages),
            kind_toggles: kinds.into_iter().map(KindToggle::new).collect(),
            option_checkboxes,
            name_input: String::new(),
            items,
        }
    }

    /// Adds another checkbox carrying `marker`, e.g. a second copy of an option in a footer.
    pub fn add_option_checkbox(&mut self, marker: impl Into<String>) {
        self.option_checkboxes.push(OptionCheckbox {
            marker: marker.into(),
            checked: false,
        });
    }

    pub fn packages(&self) -> &PackageSelect {
        &self.packages
    }

    pub fn packages_mut(&mut self) -> &mut PackageSelect {
        &mut self.packages
    }

    pub fn kind_toggles(&self) -> &[KindToggle] {
        &self.kind_toggles
    }

    /// Returns the toggle for `kind`, if the page has one.
    pub fn kind_toggle(&self, kind: &str) -> Option<&KindToggle> {
        self.kind_toggles.iter().find(|t| t.kind == kind)
    }

    /// Checks or unchecks the checkbox paired with `kind`. Returns false for unknown kinds.
    pub fn set_kind_checked(&mut self, kind: &str, checked: bool) -> bool {
        match self.kind_toggles.iter_mut().find(|t| t.kind == kind) {
            Some(toggle) => {
                toggle.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn option_checkboxes(&self) -> &[OptionCheckbox] {
        &self.option_checkboxes
    }

    /// Sets every checkbox carrying `marker`. Returns how many were updated.
    pub fn set_option_checked(&mut self, marker: &str, checked: bool) -> usize {
        let mut updated = 0;
        for checkbox in self.option_checkboxes.iter_mut().filter(|c| c.marker == marker) {
            checkbox.checked = checked;
            updated += 1;
        }
        updated
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn set_name_input(&mut self, value: impl Into<String>) {
        self.name_input = value.into();
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [ListItem] {
        &mut self.items
    }

    /// Items currently shown, in display order.
    pub fn visible_items(&self) -> impl Iterator<Item = &ListItem> {
        self.items.iter().filter(|i| i.visible)
    }
}
