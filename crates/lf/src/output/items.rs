//! Visible item output formatting.

use listing_filter::filter::FilterOption;
use listing_filter::{FilterController, ListItem, PreferenceStore};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{column_width, push_header, truncate_str};

/// Widest name column before truncation.
const MAX_NAME_WIDTH: usize = 40;

/// Widest kind column before truncation.
const MAX_KIND_WIDTH: usize = 12;

/// JSON output structure for the list command.
#[derive(Serialize)]
pub struct ItemsListOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    pub total: usize,
    pub visible: usize,
    pub filters: FiltersOutput<'a>,
    pub items: Vec<ItemOutput<'a>>,
}

/// Active filters, as reported in JSON output.
#[derive(Serialize)]
pub struct FiltersOutput<'a> {
    pub packages: Vec<&'a str>,
    pub hidden_kinds: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub ignore_case: bool,
    pub regex: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_error: Option<String>,
}

/// JSON output structure for a single item.
#[derive(Serialize)]
pub struct ItemOutput<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub package: &'a str,
}

impl<'a> From<&'a ListItem> for ItemOutput<'a> {
    fn from(item: &'a ListItem) -> Self {
        Self {
            name: &item.name,
            kind: &item.kind,
            package: &item.package,
        }
    }
}

/// Formats the controller's visible items as JSON.
pub fn format_items_json<S: PreferenceStore>(
    title: Option<&str>,
    controller: &FilterController<S>,
) -> Result<String, serde_json::Error> {
    let state = controller.state();
    let page = controller.page();

    let filters = FiltersOutput {
        packages: state.selected_packages().iter().map(String::as_str).collect(),
        hidden_kinds: page
            .kind_toggles()
            .iter()
            .filter(|t| !t.is_checked())
            .map(|t| t.kind())
            .collect(),
        name: Some(controller.name_text()).filter(|n| !n.is_empty()),
        ignore_case: state.option(FilterOption::IgnoreCase),
        regex: state.option(FilterOption::AsRegExp),
        pattern_error: controller.pattern_error().map(ToString::to_string),
    };

    let items: Vec<ItemOutput> = controller.visible_items().map(ItemOutput::from).collect();

    let output = ItemsListOutput {
        title,
        total: page.items().len(),
        visible: items.len(),
        filters,
        items,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats items as a table followed by a count line.
pub fn format_items_table(items: &[&ListItem], total: usize, use_colors: bool) -> String {
    if items.is_empty() {
        return format!("No items match ({total} total).\n");
    }

    let name_width = column_width(items.iter().map(|i| i.name.as_str()), 4, MAX_NAME_WIDTH);
    let kind_width = column_width(items.iter().map(|i| i.kind.as_str()), 4, MAX_KIND_WIDTH);

    let mut output = String::new();

    let header = format!(
        "{:<name_width$} {:<kind_width$} {}",
        "Name", "Kind", "Package"
    );
    push_header(&mut output, &header, use_colors);

    for item in items {
        let name = format!("{:<name_width$}", truncate_str(&item.name, name_width));
        let kind = format!("{:<kind_width$}", truncate_str(&item.kind, kind_width));
        let line = if use_colors {
            format!("{} {} {}", name.bold(), kind.cyan(), item.package.dimmed())
        } else {
            format!("{} {} {}", name, kind, item.package)
        };
        output.push_str(line.trim_end());
        output.push('\n');
    }

    let summary = format!("\n{} of {} items shown", items.len(), total);
    if use_colors {
        output.push_str(&summary.dimmed().to_string());
    } else {
        output.push_str(&summary);
    }
    output.push('\n');

    output
}
