//! Persisted option output formatting.

use listing_filter::filter::FilterOption;
use serde::Serialize;

use super::helpers::{format_enabled, push_header};

/// One option as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionValue {
    pub option: FilterOption,
    pub enabled: bool,
    /// Raw stored text, `None` when nothing is stored.
    pub stored: Option<String>,
}

/// JSON output structure for the options command.
#[derive(Serialize)]
pub struct OptionsOutput<'a> {
    pub path: &'a str,
    pub options: Vec<OptionOutput<'a>>,
}

/// JSON output structure for a single option.
#[derive(Serialize)]
pub struct OptionOutput<'a> {
    pub name: String,
    pub cookie: &'static str,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<&'a str>,
}

/// Formats option values as JSON.
pub fn format_options_json(path: &str, values: &[OptionValue]) -> Result<String, serde_json::Error> {
    let options = values
        .iter()
        .map(|v| OptionOutput {
            name: v.option.to_string(),
            cookie: v.option.cookie_name(),
            enabled: v.enabled,
            stored: v.stored.as_deref(),
        })
        .collect();

    serde_json::to_string_pretty(&OptionsOutput { path, options })
}

/// Formats option values as a table.
pub fn format_options_table(values: &[OptionValue], use_colors: bool) -> String {
    let mut output = String::new();
    push_header(
        &mut output,
        &format!("{:<12} {:<4} {}", "Option", "", "Cookie"),
        use_colors,
    );

    for value in values {
        let state = format_enabled(value.enabled, use_colors);
        // Escape codes would count towards a format width, so pad by hand
        let pad = if value.enabled { "  " } else { " " };
        output.push_str(&format!(
            "{:<12} {}{} {}\n",
            value.option.to_string(),
            state,
            pad,
            value.option.cookie_name()
        ));
    }

    output
}

/// Formats the result of a toggle.
pub fn format_toggled(option: FilterOption, enabled: bool, use_colors: bool) -> String {
    format!("{} is now {}\n", option, format_enabled(enabled, use_colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> Vec<OptionValue> {
        vec![
            OptionValue {
                option: FilterOption::IgnoreCase,
                enabled: true,
                stored: Some("true".to_string()),
            },
            OptionValue {
                option: FilterOption::AsRegExp,
                enabled: false,
                stored: None,
            },
        ]
    }

    #[test]
    fn test_options_table() {
        let table = format_options_table(&values(), false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[1], "ignore-case  on   filter4NameIgnoreCase");
        assert_eq!(lines[2], "regex        off  filter4NameAsRegExp");
    }

    #[test]
    fn test_options_json() {
        let json = format_options_json("/tmp/cookies.json", &values()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["path"], "/tmp/cookies.json");
        assert_eq!(value["options"][0]["name"], "ignore-case");
        assert_eq!(value["options"][0]["stored"], "true");
        assert_eq!(value["options"][1]["cookie"], "filter4NameAsRegExp");
        assert!(value["options"][1].get("stored").is_none());
    }

    #[test]
    fn test_format_toggled() {
        assert_eq!(
            format_toggled(FilterOption::AsRegExp, true, false),
            "regex is now on\n"
        );
    }
}
