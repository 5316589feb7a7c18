//! Package and kind catalog output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{column_width, push_header, truncate_str};

/// Widest name column before truncation.
const MAX_NAME_WIDTH: usize = 60;

/// JSON output structure for one catalog entry.
#[derive(Serialize)]
pub struct CountOutput<'a> {
    pub name: &'a str,
    pub count: usize,
}

/// Formats `(name, count)` pairs as JSON under the `key` field.
pub fn format_counts_json(key: &str, counts: &[(&str, usize)]) -> Result<String, serde_json::Error> {
    let entries: Vec<CountOutput> = counts
        .iter()
        .map(|&(name, count)| CountOutput { name, count })
        .collect();

    let mut output = serde_json::Map::new();
    output.insert(key.to_string(), serde_json::to_value(entries)?);
    serde_json::to_string_pretty(&output)
}

/// Formats `(name, count)` pairs as a two-column table.
///
/// `label` is the heading of the name column, e.g. "Package".
pub fn format_counts_table(label: &str, counts: &[(&str, usize)], use_colors: bool) -> String {
    if counts.is_empty() {
        return format!("No {}s found.\n", label.to_lowercase());
    }

    let width = column_width(
        counts.iter().map(|(name, _)| *name).chain(std::iter::once(label)),
        4,
        MAX_NAME_WIDTH,
    );

    let mut output = String::new();
    push_header(&mut output, &format!("{:<width$} {:>5}", label, "Items"), use_colors);

    for (name, count) in counts {
        let name = format!("{:<width$}", truncate_str(name, width));
        let count = format!("{count:>5}");
        if use_colors && count.trim() == "0" {
            output.push_str(&format!("{} {}\n", name.dimmed(), count.dimmed()));
        } else {
            output.push_str(&format!("{name} {count}\n"));
        }
    }

    output
}
