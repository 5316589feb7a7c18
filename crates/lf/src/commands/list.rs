//! List command implementation.
//!
//! Loads the listing, replays the requested interactions against a
//! [`FilterController`] and prints the items left visible.

use listing_filter::filter::FilterOption;
use listing_filter::{FilterController, ListItem, PersistentCookieJar, PreferenceStore};
use tracing::warn;

use super::{find_similar_name, format_unknown, CommandContext, Result};
use crate::output::{format_items_json, format_items_table};

/// Options for the list command.
#[derive(Debug, Default)]
pub struct ListOptions {
    /// Packages to show. Empty shows every package.
    pub packages: Vec<String>,
    /// Kinds to show. Empty shows every kind.
    pub kinds: Vec<String>,
    /// Kinds to hide.
    pub hide_kinds: Vec<String>,
    /// Name filter text.
    pub name: Option<String>,
    /// Desired regex option, `None` keeps the stored value.
    pub regex: Option<bool>,
    /// Desired ignore-case option, `None` keeps the stored value.
    pub ignore_case: Option<bool>,
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the listing cannot be loaded or a changed option
/// cannot be persisted.
pub async fn execute(ctx: &CommandContext, opts: &ListOptions) -> Result<()> {
    let listing = ctx.listing_store()?.load_async().await?;
    let title = listing.title.clone();
    let prefs = PersistentCookieJar::open_async(ctx.cookie_file()?).await?;

    let mut controller = FilterController::new(listing.into_page(), prefs)
        .with_cookie_options(ctx.cookie_options());
    controller.initialize();

    for warning in apply(&mut controller, opts)? {
        warn!("{warning}");
    }
    controller.settle().await;

    if ctx.json_output {
        println!("{}", format_items_json(title.as_deref(), &controller)?);
    } else if !ctx.quiet {
        let visible: Vec<&ListItem> = controller.visible_items().collect();
        let total = controller.page().items().len();
        print!("{}", format_items_table(&visible, total, ctx.use_colors));
    }

    Ok(())
}

/// Replays the list options against an initialized controller.
///
/// Options are applied first, then packages, kinds and finally the name text,
/// the same order a user would work through the page controls. Returns a
/// warning per unknown package or kind.
///
/// # Errors
///
/// Returns an error if a changed option cannot be persisted.
pub fn apply<S: PreferenceStore>(
    controller: &mut FilterController<S>,
    opts: &ListOptions,
) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    for (option, desired) in [
        (FilterOption::IgnoreCase, opts.ignore_case),
        (FilterOption::AsRegExp, opts.regex),
    ] {
        if let Some(desired) = desired {
            if controller.state().option(option) != desired {
                controller.toggle_option(option)?;
            }
        }
    }

    apply_packages(controller, &opts.packages, &mut warnings);
    apply_kinds(controller, &opts.kinds, &opts.hide_kinds, &mut warnings);

    if let Some(name) = &opts.name {
        controller.set_name_pattern(name);
    }

    Ok(warnings)
}

fn apply_packages<S: PreferenceStore>(
    controller: &mut FilterController<S>,
    packages: &[String],
    warnings: &mut Vec<String>,
) {
    let known: Vec<String> = controller
        .page()
        .packages()
        .options()
        .iter()
        .map(|o| o.text.clone())
        .collect();

    let mut valid = Vec::new();
    for package in packages {
        if known.contains(package) {
            valid.push(package.as_str());
        } else {
            let suggestion = find_similar_name(package, known.iter().map(String::as_str));
            warnings.push(format_unknown("package", package, suggestion.as_deref()));
        }
    }

    let Some((first, rest)) = valid.split_first() else {
        return;
    };
    controller.select_package(first);
    if !rest.is_empty() {
        for package in rest {
            controller.page_mut().packages_mut().set_selected(package, true);
        }
        controller.set_package_filter();
    }
}

fn apply_kinds<S: PreferenceStore>(
    controller: &mut FilterController<S>,
    show: &[String],
    hide: &[String],
    warnings: &mut Vec<String>,
) {
    let known: Vec<String> = controller
        .page()
        .kind_toggles()
        .iter()
        .map(|t| t.kind().to_string())
        .collect();

    let unknown = |kind: &String, warnings: &mut Vec<String>| {
        let suggestion = find_similar_name(kind, known.iter().map(String::as_str));
        warnings.push(format_unknown("kind", kind, suggestion.as_deref()));
    };

    let shown: Vec<&String> = show.iter().filter(|k| known.contains(k)).collect();
    for kind in show.iter().filter(|k| !known.contains(k)) {
        unknown(kind, warnings);
    }

    // Only narrow when at least one requested kind exists
    if !shown.is_empty() {
        for kind in &known {
            if !shown.contains(&kind) && controller.state().is_kind_active(kind) {
                controller.toggle_kind(kind);
            }
        }
    }

    for kind in hide {
        if !known.contains(kind) {
            unknown(kind, warnings);
        } else if controller.state().is_kind_active(kind) {
            controller.toggle_kind(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_filter::{CookieJar, Listing};

    fn controller_with(jar: CookieJar) -> FilterController<CookieJar> {
        let listing = Listing::from_items(vec![
            ListItem::new("Alpha", "p1", "class"),
            ListItem::new("Beta", "p2", "interface"),
            ListItem::new("Gamma", "p1", "object"),
            ListItem::new("alphabet", "p3", "class"),
        ]);
        let mut controller = FilterController::new(listing.into_page(), jar);
        controller.initialize();
        controller
    }

    fn controller() -> FilterController<CookieJar> {
        controller_with(CookieJar::new())
    }

    /// Applies `opts` and flushes the pending name recompute.
    fn run(controller: &mut FilterController<CookieJar>, opts: &ListOptions) -> Vec<String> {
        let warnings = apply(controller, opts).expect("apply failed");
        controller.recompute();
        warnings
    }

    fn visible(controller: &FilterController<CookieJar>) -> Vec<&str> {
        controller.visible_items().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_no_options_shows_everything() {
        let mut controller = controller();
        let warnings = run(&mut controller, &ListOptions::default());

        assert!(warnings.is_empty());
        assert_eq!(visible(&controller).len(), 4);
    }

    #[test]
    fn test_single_package() {
        let mut controller = controller();
        run(
            &mut controller,
            &ListOptions {
                packages: vec!["p1".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(visible(&controller), vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_multiple_packages() {
        let mut controller = controller();
        run(
            &mut controller,
            &ListOptions {
                packages: vec!["p2".to_string(), "p3".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(visible(&controller), vec!["Beta", "alphabet"]);
    }

    #[test]
    fn test_unknown_package_warns_with_suggestion() {
        let mut controller = controller();
        let warnings = run(
            &mut controller,
            &ListOptions {
                packages: vec!["P1".to_string(), "zzz".to_string()],
                ..Default::default()
            },
        );

        assert_eq!(
            warnings,
            vec![
                "unknown package 'P1'. Did you mean 'p1'?".to_string(),
                "unknown package 'zzz'".to_string(),
            ]
        );
        assert_eq!(visible(&controller).len(), 4);
    }

    #[test]
    fn test_show_only_kinds() {
        let mut controller = controller();
        run(
            &mut controller,
            &ListOptions {
                kinds: vec!["class".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(visible(&controller), vec!["Alpha", "alphabet"]);
        assert!(!controller.state().is_kind_active("object"));
    }

    #[test]
    fn test_unknown_show_kind_does_not_hide_everything() {
        let mut controller = controller();
        let warnings = run(
            &mut controller,
            &ListOptions {
                kinds: vec!["clas".to_string()],
                ..Default::default()
            },
        );

        assert_eq!(warnings, vec!["unknown kind 'clas'. Did you mean 'class'?"]);
        assert_eq!(visible(&controller).len(), 4);
    }

    #[test]
    fn test_hide_kind() {
        let mut controller = controller();
        run(
            &mut controller,
            &ListOptions {
                hide_kinds: vec!["class".to_string(), "enum".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(visible(&controller), vec!["Beta", "Gamma"]);
    }

    #[test]
    fn test_name_with_ignore_case_persists_option() {
        let mut controller = controller();
        run(
            &mut controller,
            &ListOptions {
                name: Some("al".to_string()),
                ignore_case: Some(true),
                ..Default::default()
            },
        );

        assert_eq!(visible(&controller), vec!["Alpha", "alphabet"]);
        assert_eq!(
            controller.preferences().get("filter4NameIgnoreCase").as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_matching_option_is_not_rewritten() {
        let jar = CookieJar::from_cookie_string("filter4NameAsRegExp=true");
        let mut controller = controller_with(jar);
        run(
            &mut controller,
            &ListOptions {
                name: Some(".*eta$".to_string()),
                regex: Some(true),
                ..Default::default()
            },
        );

        assert_eq!(visible(&controller), vec!["Beta"]);
        assert_eq!(controller.preferences().cookies().len(), 1);
    }

    #[test]
    fn test_stored_regex_option_applies_without_flag() {
        let jar = CookieJar::from_cookie_string("filter4NameAsRegExp=true");
        let mut controller = controller_with(jar);
        run(
            &mut controller,
            &ListOptions {
                name: Some("ph".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(visible(&controller), vec!["Alpha", "alphabet"]);
    }

    #[test]
    fn test_invalid_regex_lists_everything() {
        let mut controller = controller();
        run(
            &mut controller,
            &ListOptions {
                name: Some("Foo(".to_string()),
                regex: Some(true),
                ..Default::default()
            },
        );

        assert_eq!(visible(&controller).len(), 4);
        assert!(controller.pattern_error().is_some());
    }
}
