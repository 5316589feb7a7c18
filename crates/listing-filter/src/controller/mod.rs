//! The filter controller.
//!
//! [`FilterController`] owns a [`Page`] and a [`PreferenceStore`]. Control
//! changes update the in-memory [`FilterState`] and then recompute which
//! items are visible. Package and kind changes recompute at once; name text
//! and option changes go through a [`Debouncer`] so a burst of keystrokes
//! costs a single pass.
//!
//! # Thread Safety
//!
//! `FilterController` is [`Send`] when its store is, but not meant to be
//! shared. Every mutating method takes `&mut self`.

use tokio::time::Duration;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::filter::{parse_bool, FilterError, FilterOption, FilterState, NamePattern};
use crate::page::{ListItem, Page};
use crate::prefs::{CookieOptions, PreferenceStore, Result as PrefsResult};

/// Drives the package, kind and name filters of one page.
#[derive(Debug)]
pub struct FilterController<S> {
    page: Page,
    prefs: S,
    state: FilterState,
    /// Raw text of the name input, as last seen.
    name_text: String,
    /// Compile error of the current name text, if any.
    pattern_error: Option<FilterError>,
    debouncer: Debouncer,
    recompute_count: u64,
    /// Attributes used when writing options to the store.
    cookie_options: CookieOptions,
}

impl<S: PreferenceStore> FilterController<S> {
    /// Creates a controller with the default 300 ms quiet period.
    ///
    /// Nothing is read from the store until [`initialize`](Self::initialize).
    pub fn new(page: Page, prefs: S) -> Self {
        Self {
            page,
            prefs,
            state: FilterState::new(),
            name_text: String::new(),
            pattern_error: None,
            debouncer: Debouncer::default(),
            recompute_count: 0,
            cookie_options: CookieOptions::default(),
        }
    }

    /// Replaces the debounce quiet period.
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.debouncer = Debouncer::new(quiet_period);
        self
    }

    /// Sets the attributes (expiry, path, ...) used when options are persisted.
    pub fn with_cookie_options(mut self, options: CookieOptions) -> Self {
        self.cookie_options = options;
        self
    }

    /// Loads persisted options and binds every control to its initial state.
    ///
    /// Afterwards no package is selected, every known kind is active, the
    /// name input is empty and all items are visible.
    pub fn initialize(&mut self) {
        for option in FilterOption::ALL {
            let stored = self.prefs.get(option.cookie_name());
            let value = parse_bool(stored.as_deref());
            self.state.set_option(option, value);
            self.page.set_option_checked(&option.checkbox_marker(), value);
        }

        self.page.packages_mut().clear_selection();
        self.state.set_packages(Vec::<String>::new());

        self.state.clear_kinds();
        let kinds: Vec<String> = self
            .page
            .kind_toggles()
            .iter()
            .map(|t| t.kind().to_string())
            .collect();
        for kind in kinds {
            self.page.set_kind_checked(&kind, true);
            self.state.register_kind(kind);
        }

        self.page.set_name_input("");
        self.name_text.clear();
        self.refresh_name_pattern();

        debug!(
            items = self.page.items().len(),
            kinds = self.state.total_kinds(),
            ignore_case = self.state.option(FilterOption::IgnoreCase),
            as_regexp = self.state.option(FilterOption::AsRegExp),
            "initialized filter controller"
        );
        self.recompute();
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Flips `option`, syncs its checkboxes and writes it to the store.
    ///
    /// The name pattern is recompiled and a recompute is scheduled. Returns
    /// the new value.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the value cannot be persisted. The
    /// in-memory state has already changed in that case.
    pub fn toggle_option(&mut self, option: FilterOption) -> PrefsResult<bool> {
        let value = !self.state.option(option);
        self.state.set_option(option, value);
        self.page.set_option_checked(&option.checkbox_marker(), value);
        self.refresh_name_pattern();
        self.debouncer.schedule();

        let stored = if value { "true" } else { "false" };
        self.prefs
            .set(option.cookie_name(), Some(stored), &self.cookie_options)?;
        Ok(value)
    }

    // =========================================================================
    // Packages and kinds
    // =========================================================================

    /// Reads the package multi-select and recomputes.
    ///
    /// An empty selection disables the package filter.
    pub fn set_package_filter(&mut self) {
        let selected = self.page.packages().selected_texts();
        self.state.set_packages(selected);
        self.recompute();
    }

    /// Selects exactly the package options whose text is `name`, then applies
    /// the package filter.
    ///
    /// Returns false and changes nothing when no option has that text.
    pub fn select_package(&mut self, name: &str) -> bool {
        if !self.page.packages_mut().select_only(name) {
            warn!(package = name, "no package option matches");
            return false;
        }
        self.set_package_filter();
        true
    }

    /// Flips `kind` between active and inactive, syncs its checkbox and recomputes.
    ///
    /// Returns the new state, or `None` for a kind the page does not know.
    pub fn toggle_kind(&mut self, kind: &str) -> Option<bool> {
        if self.page.kind_toggle(kind).is_none() {
            debug!(kind, "ignoring toggle for unknown kind");
            return None;
        }

        let active = if self.state.is_kind_active(kind) {
            self.state.deactivate_kind(kind);
            false
        } else {
            self.state.activate_kind(kind);
            true
        };
        self.page.set_kind_checked(kind, active);
        self.recompute();
        Some(active)
    }

    // =========================================================================
    // Name
    // =========================================================================

    /// Stores the name input text, recompiles the pattern and schedules a recompute.
    ///
    /// A pattern that fails to compile filters nothing; see
    /// [`pattern_error`](Self::pattern_error).
    pub fn set_name_pattern(&mut self, value: &str) {
        self.page.set_name_input(value);
        self.name_text = value.to_string();
        self.refresh_name_pattern();
        self.debouncer.schedule();
    }

    fn refresh_name_pattern(&mut self) {
        let compiled = NamePattern::compile(
            &self.name_text,
            self.state.option(FilterOption::AsRegExp),
            self.state.option(FilterOption::IgnoreCase),
        );
        match compiled {
            Ok(pattern) => {
                self.state.set_name_pattern(pattern);
                self.pattern_error = None;
            }
            Err(e) => {
                warn!(error = %e, "name filter disabled");
                self.state.set_name_pattern(None);
                self.pattern_error = Some(e);
            }
        }
    }

    // =========================================================================
    // Recompute
    // =========================================================================

    /// Shows each item that passes every filter and hides the rest.
    ///
    /// Any pending debounced recompute is dropped, since this pass covers it.
    pub fn recompute(&mut self) {
        self.debouncer.cancel();

        let state = &self.state;
        let mut visible = 0usize;
        for item in self.page.items_mut() {
            item.visible = state.matches(item);
            if item.visible {
                visible += 1;
            }
        }
        self.recompute_count += 1;

        debug!(
            pass = self.recompute_count,
            visible,
            total = self.page.items().len(),
            "recomputed visibility"
        );
    }

    /// Runs the pending recompute if its quiet period has elapsed.
    ///
    /// Returns true if a recompute ran.
    pub fn tick(&mut self) -> bool {
        if self.debouncer.poll() {
            self.recompute();
            true
        } else {
            false
        }
    }

    /// Waits for the pending recompute, if any, and runs it.
    ///
    /// Returns true if a recompute ran.
    pub async fn settle(&mut self) -> bool {
        let Some(deadline) = self.debouncer.deadline() else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;
        self.debouncer.fire_if_due(deadline);
        self.recompute();
        true
    }

    pub fn has_pending_recompute(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Number of completed recompute passes.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Why the current name text filters nothing, if it failed to compile.
    pub fn pattern_error(&self) -> Option<&FilterError> {
        self.pattern_error.as_ref()
    }

    pub fn name_text(&self) -> &str {
        &self.name_text
    }

    /// Items shown after the last recompute, in display order.
    pub fn visible_items(&self) -> impl Iterator<Item = &ListItem> {
        self.page.visible_items()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mutable access to the page, e.g. to change the package selection
    /// before calling [`set_package_filter`](Self::set_package_filter).
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn preferences(&self) -> &S {
        &self.prefs
    }

    /// Consumes the controller, returning the page and the store.
    pub fn into_parts(self) -> (Page, S) {
        (self.page, self.prefs)
    }
}
