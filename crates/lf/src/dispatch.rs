//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands that only touch small local files run synchronously. Listing
//! commands run on the async runtime so the name filter debounce can settle.

use crate::cli::{flag_pair, Cli, Commands, ConfigCommands, OptionsCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run to completion without the async runtime.
pub trait SyncCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that drive a filter controller.
#[allow(async_fn_in_trait)]
pub trait AsyncCommand {
    /// Execute the command, waiting for pending recomputes.
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Synchronous commands.
pub enum SyncDispatch<'a> {
    Packages,
    Kinds,
    Options(&'a Option<OptionsCommands>),
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> SyncDispatch<'a> {
    /// Try to create a sync dispatch from the CLI command.
    /// Returns None if the command needs the async runtime.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Packages) => Some(Self::Packages),
            Some(Commands::Kinds) => Some(Self::Kinds),
            Some(Commands::Options { command }) => Some(Self::Options(command)),
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            Some(Commands::List { .. }) => None,
        }
    }
}

impl SyncCommand for SyncDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Packages => commands::packages::execute(ctx),
            Self::Kinds => commands::kinds::execute(ctx),
            Self::Options(command) => dispatch_options(ctx, command),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("lf - filter package listings by package, kind and name");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

fn dispatch_options(ctx: &CommandContext, command: &Option<OptionsCommands>) -> Result<()> {
    match command {
        Some(OptionsCommands::Show) | None => commands::options::execute_show(ctx),
        Some(OptionsCommands::Toggle { name }) => commands::options::execute_toggle(ctx, name),
        Some(OptionsCommands::Reset) => commands::options::execute_reset(ctx),
    }
}

fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that run on the async runtime.
pub enum AsyncDispatch<'a> {
    List {
        packages: &'a [String],
        kinds: &'a [String],
        hide_kinds: &'a [String],
        name: &'a Option<String>,
        regex: Option<bool>,
        ignore_case: Option<bool>,
    },
}

impl<'a> AsyncDispatch<'a> {
    /// Create an async dispatch from the CLI command.
    /// Returns None for commands handled by [`SyncDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List {
                packages,
                kinds,
                hide_kinds,
                name,
                regex,
                no_regex,
                ignore_case,
                case_sensitive,
            }) => Some(Self::List {
                packages,
                kinds,
                hide_kinds,
                name,
                regex: flag_pair(*regex, *no_regex),
                ignore_case: flag_pair(*ignore_case, *case_sensitive),
            }),
            _ => None,
        }
    }
}

impl AsyncCommand for AsyncDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::List {
                packages,
                kinds,
                hide_kinds,
                name,
                regex,
                ignore_case,
            } => {
                let opts = commands::list::ListOptions {
                    packages: packages.to_vec(),
                    kinds: kinds.to_vec(),
                    hide_kinds: hide_kinds.to_vec(),
                    name: (*name).clone(),
                    regex: *regex,
                    ignore_case: *ignore_case,
                };
                commands::list::execute(ctx, &opts).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_sync_dispatch_config_show() {
        let cli = Cli::parse_from(["lf", "config", "show"]);
        let dispatch = SyncDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(SyncDispatch::Config(_))));
    }

    #[test]
    fn test_sync_dispatch_options_toggle() {
        let cli = Cli::parse_from(["lf", "options", "toggle", "regex"]);
        let dispatch = SyncDispatch::try_from_cli(&cli);
        assert!(matches!(
            dispatch,
            Some(SyncDispatch::Options(Some(OptionsCommands::Toggle { .. })))
        ));
    }

    #[test]
    fn test_sync_dispatch_catalog() {
        let cli = Cli::parse_from(["lf", "packages"]);
        assert!(matches!(SyncDispatch::try_from_cli(&cli), Some(SyncDispatch::Packages)));

        let cli = Cli::parse_from(["lf", "kinds"]);
        assert!(matches!(SyncDispatch::try_from_cli(&cli), Some(SyncDispatch::Kinds)));
    }

    #[test]
    fn test_sync_dispatch_help() {
        let cli = Cli::parse_from(["lf"]);
        let dispatch = SyncDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(SyncDispatch::Help)));
    }

    #[test]
    fn test_sync_dispatch_returns_none_for_list() {
        let cli = Cli::parse_from(["lf", "list"]);
        assert!(SyncDispatch::try_from_cli(&cli).is_none());
    }

    #[test]
    fn test_async_dispatch_list_flags() {
        let cli = Cli::parse_from(["lf", "list", "-p", "p1", "-n", "Al", "--no-regex", "-i"]);
        let dispatch = AsyncDispatch::from_cli(&cli);

        match dispatch {
            Some(AsyncDispatch::List {
                packages,
                name,
                regex,
                ignore_case,
                ..
            }) => {
                assert_eq!(packages, ["p1".to_string()]);
                assert_eq!(name.as_deref(), Some("Al"));
                assert_eq!(regex, Some(false));
                assert_eq!(ignore_case, Some(true));
            }
            _ => panic!("expected list dispatch"),
        }
    }

    #[test]
    fn test_async_dispatch_list_keeps_stored_options() {
        let cli = Cli::parse_from(["lf", "list"]);
        match AsyncDispatch::from_cli(&cli) {
            Some(AsyncDispatch::List {
                regex, ignore_case, ..
            }) => {
                assert_eq!(regex, None);
                assert_eq!(ignore_case, None);
            }
            _ => panic!("expected list dispatch"),
        }
    }

    #[test]
    fn test_async_dispatch_returns_none_for_config() {
        let cli = Cli::parse_from(["lf", "config", "show"]);
        assert!(AsyncDispatch::from_cli(&cli).is_none());
    }
}
