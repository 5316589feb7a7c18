//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the lf CLI.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// lf - filter listing pages by package, kind and name
#[derive(Parser, Debug)]
#[command(name = "lf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (repeat for more detail)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Listing file to read (default: from config)
    #[arg(long, global = true, env = "LF_LISTING", value_name = "FILE")]
    pub listing: Option<PathBuf>,

    /// Cookie file holding persisted options (default: data directory)
    #[arg(long, global = true, env = "LF_COOKIES", value_name = "FILE")]
    pub cookies: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the items that pass the filters
    #[command(alias = "l")]
    List {
        /// Show only this package (repeatable)
        #[arg(short, long = "package", value_name = "PKG", action = ArgAction::Append)]
        packages: Vec<String>,

        /// Show only this kind (repeatable)
        #[arg(short, long = "kind", value_name = "KIND", action = ArgAction::Append)]
        kinds: Vec<String>,

        /// Hide this kind (repeatable)
        #[arg(long = "hide-kind", value_name = "KIND", action = ArgAction::Append)]
        hide_kinds: Vec<String>,

        /// Name filter (prefix, or regular expression with --regex)
        #[arg(short, long, value_name = "TEXT")]
        name: Option<String>,

        /// Treat the name filter as a regular expression (persisted)
        #[arg(long, overrides_with = "no_regex")]
        regex: bool,

        /// Treat the name filter as a prefix (persisted)
        #[arg(long)]
        no_regex: bool,

        /// Match names regardless of case (persisted)
        #[arg(short, long, overrides_with = "case_sensitive")]
        ignore_case: bool,

        /// Match names with exact case (persisted)
        #[arg(long)]
        case_sensitive: bool,
    },

    /// List known packages with item counts
    #[command(alias = "p")]
    Packages,

    /// List known kinds with item counts
    Kinds,

    /// Show or change the persisted name filter options
    Options {
        #[command(subcommand)]
        command: Option<OptionsCommands>,
    },

    /// View or edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Options subcommands
#[derive(Subcommand, Debug)]
pub enum OptionsCommands {
    /// Show the persisted options
    Show,

    /// Flip one option
    Toggle {
        /// Option name: ignore-case or regex
        name: String,
    },

    /// Delete both persisted options
    Reset,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}

/// Resolves a `--flag` / `--no-flag` pair into an explicit choice.
pub fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["lf", "-vv", "list"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["lf", "--quiet", "--json", "list"]);
        assert_eq!(cli.verbose, 0);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["lf", "-q", "-v", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_listing_and_cookie_paths() {
        let cli = Cli::parse_from([
            "lf",
            "--listing",
            "/tmp/listing.json",
            "--cookies",
            "/tmp/cookies.json",
            "packages",
        ]);
        assert_eq!(cli.listing, Some(PathBuf::from("/tmp/listing.json")));
        assert_eq!(cli.cookies, Some(PathBuf::from("/tmp/cookies.json")));
    }

    #[test]
    fn test_list_filters() {
        let cli = Cli::parse_from([
            "lf", "list", "-p", "p1", "--package", "p2", "--kind", "class", "--hide-kind",
            "object", "-n", "Al", "--regex", "-i",
        ]);

        match cli.command {
            Some(Commands::List {
                packages,
                kinds,
                hide_kinds,
                name,
                regex,
                no_regex,
                ignore_case,
                case_sensitive,
            }) => {
                assert_eq!(packages, vec!["p1", "p2"]);
                assert_eq!(kinds, vec!["class"]);
                assert_eq!(hide_kinds, vec!["object"]);
                assert_eq!(name.as_deref(), Some("Al"));
                assert_eq!(flag_pair(regex, no_regex), Some(true));
                assert_eq!(flag_pair(ignore_case, case_sensitive), Some(true));
            }
            other => panic!("Expected List command, got {:?}", other),
        }
    }

    #[test]
    fn test_list_option_flags_override() {
        let cli = Cli::parse_from(["lf", "list", "--regex", "--no-regex"]);
        if let Some(Commands::List {
            regex, no_regex, ..
        }) = cli.command
        {
            assert_eq!(flag_pair(regex, no_regex), Some(false));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_list_alias() {
        let cli = Cli::parse_from(["lf", "l"]);
        assert!(matches!(cli.command, Some(Commands::List { .. })));
    }

    #[test]
    fn test_flag_pair_unset() {
        assert_eq!(flag_pair(false, false), None);
        assert_eq!(flag_pair(false, true), Some(false));
    }

    #[test]
    fn test_options_toggle() {
        let cli = Cli::parse_from(["lf", "options", "toggle", "ignore-case"]);
        if let Some(Commands::Options {
            command: Some(OptionsCommands::Toggle { name }),
        }) = cli.command
        {
            assert_eq!(name, "ignore-case");
        } else {
            panic!("Expected Options Toggle command");
        }
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from(["lf", "config", "set", "listing", "/tmp/x.json"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "listing");
            assert_eq!(value, "/tmp/x.json");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["lf", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
