//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Width of the widest value, clamped to `[min, max]`.
pub fn column_width<'a>(values: impl Iterator<Item = &'a str>, min: usize, max: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(min, max)
}

/// Appends a dimmed header line.
pub fn push_header(output: &mut String, header: &str, use_colors: bool) {
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(header);
        output.push('\n');
    }
}

/// Formats an on/off state for display.
pub fn format_enabled(enabled: bool, use_colors: bool) -> String {
    let label = if enabled { "on" } else { "off" };
    if !use_colors {
        return label.to_string();
    }
    if enabled {
        label.green().to_string()
    } else {
        label.dimmed().to_string()
    }
}
