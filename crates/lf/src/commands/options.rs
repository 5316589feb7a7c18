//! Options command implementation.
//!
//! Shows, flips or clears the persisted name filter options without loading
//! a listing. The values live in the same cookie file `lf list` reads.

use listing_filter::filter::{parse_bool, FilterOption};
use listing_filter::prefs::Result as PrefsResult;
use listing_filter::{CookieOptions, PersistentCookieJar, PreferenceStore};
use tracing::info;

use super::{CommandContext, Result};
use crate::output::{format_options_json, format_options_table, format_toggled, OptionValue};

/// Reads every option from the store.
pub fn read_values(prefs: &impl PreferenceStore) -> Vec<OptionValue> {
    FilterOption::ALL
        .into_iter()
        .map(|option| {
            let stored = prefs.get(option.cookie_name());
            OptionValue {
                option,
                enabled: parse_bool(stored.as_deref()),
                stored,
            }
        })
        .collect()
}

/// Flips one stored option. Returns the new value.
pub fn toggle(
    prefs: &mut impl PreferenceStore,
    option: FilterOption,
    cookie_options: &CookieOptions,
) -> PrefsResult<bool> {
    let enabled = !parse_bool(prefs.get(option.cookie_name()).as_deref());
    let stored = if enabled { "true" } else { "false" };
    prefs.set(option.cookie_name(), Some(stored), cookie_options)?;
    Ok(enabled)
}

/// Deletes every stored option.
pub fn reset(prefs: &mut impl PreferenceStore) -> PrefsResult<()> {
    for option in FilterOption::ALL {
        prefs.set(option.cookie_name(), None, &CookieOptions::default())?;
    }
    Ok(())
}

fn open(ctx: &CommandContext) -> Result<PersistentCookieJar> {
    Ok(PersistentCookieJar::open(ctx.cookie_file()?)?)
}

/// Executes the options show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let prefs = open(ctx)?;
    let values = read_values(&prefs);

    if ctx.json_output {
        let path = prefs.file().path().display().to_string();
        println!("{}", format_options_json(&path, &values)?);
    } else if !ctx.quiet {
        print!("{}", format_options_table(&values, ctx.use_colors));
    }

    Ok(())
}

/// Executes the options toggle command.
///
/// # Errors
///
/// Returns `CommandError::Filter` for an unknown option name and
/// `CommandError::Prefs` if the cookie file cannot be written.
pub fn execute_toggle(ctx: &CommandContext, name: &str) -> Result<()> {
    let option: FilterOption = name.parse()?;
    let mut prefs = open(ctx)?;
    let enabled = toggle(&mut prefs, option, &ctx.cookie_options())?;
    info!(option = %option, enabled, "toggled option");

    if ctx.json_output {
        let output = serde_json::json!({
            "name": option.to_string(),
            "cookie": option.cookie_name(),
            "enabled": enabled,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        print!("{}", format_toggled(option, enabled, ctx.use_colors));
    }

    Ok(())
}

/// Executes the options reset command.
pub fn execute_reset(ctx: &CommandContext) -> Result<()> {
    let mut prefs = open(ctx)?;
    reset(&mut prefs)?;
    // Nothing else lives in the file once the options are gone
    if prefs.jar().is_empty() {
        prefs.file().delete()?;
    }
    info!(path = %prefs.file().path().display(), "cleared stored options");

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "status": "success" }))?);
    } else if !ctx.quiet {
        println!("Options reset.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_filter::CookieJar;

    #[test]
    fn test_read_values_defaults() {
        let values = read_values(&CookieJar::new());
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| !v.enabled && v.stored.is_none()));
    }

    #[test]
    fn test_read_values_only_true_enables() {
        let jar = CookieJar::from_cookie_string("filter4NameIgnoreCase=TRUE; filter4NameAsRegExp=true");
        let values = read_values(&jar);

        assert!(!values[0].enabled);
        assert_eq!(values[0].stored.as_deref(), Some("TRUE"));
        assert!(values[1].enabled);
    }

    #[test]
    fn test_toggle_writes_string_values() {
        let mut jar = CookieJar::new();
        let options = CookieOptions::default();

        assert!(toggle(&mut jar, FilterOption::AsRegExp, &options).unwrap());
        assert_eq!(jar.cookie_string(), "filter4NameAsRegExp=true");

        assert!(!toggle(&mut jar, FilterOption::AsRegExp, &options).unwrap());
        assert_eq!(jar.cookie_string(), "filter4NameAsRegExp=false");
    }

    #[test]
    fn test_reset_removes_options() {
        let mut jar =
            CookieJar::from_cookie_string("filter4NameIgnoreCase=true; other=1; filter4NameAsRegExp=false");
        reset(&mut jar).unwrap();

        assert_eq!(jar.cookie_string(), "other=1");
    }
}
