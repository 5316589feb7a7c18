//! Config command implementation.
//!
//! The config file is TOML at `~/.config/lf/config.toml` (or
//! `$XDG_CONFIG_HOME/lf/config.toml`). `LF_CONFIG` points at another file.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CommandContext, CommandError, Result};

/// Lifetime of persisted options when the config does not set one.
const DEFAULT_REMEMBER_DAYS: i64 = 365;

/// Longest accepted lifetime of persisted options, about a century.
const MAX_REMEMBER_DAYS: i64 = 36_500;

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "LF_CONFIG";

/// Settings read from the config file. Every field is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listing file used when `--listing` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<PathBuf>,

    /// Cookie file used when `--cookies` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<PathBuf>,

    /// Days persisted options are kept. 0 keeps them for the session only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_days: Option<i64>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// `[output]` table.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl Config {
    /// Days persisted options are kept, with the default applied.
    pub fn remember_days(&self) -> i64 {
        self.remember_days.unwrap_or(DEFAULT_REMEMBER_DAYS)
    }

    /// Reads a config file. A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CommandError::Config(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        let config: Self = toml::from_str(&content)
            .map_err(|e| CommandError::Config(format!("cannot parse {}: {e}", path.display())))?;
        if let Some(days) = config.remember_days {
            check_remember_days(days)
                .map_err(|e| CommandError::Config(format!("{}: {e}", path.display())))?;
        }
        Ok(config)
    }

    /// Writes the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CommandError::Config(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CommandError::Config(format!("cannot serialize config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| CommandError::Config(format!("cannot write {}: {e}", path.display())))?;

        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Current value of `key` as display text, `None` when unset.
    fn value_of(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Listing => self.listing.as_ref().map(|p| p.display().to_string()),
            ConfigKey::Cookies => self.cookies.as_ref().map(|p| p.display().to_string()),
            ConfigKey::RememberDays => self.remember_days.map(|d| d.to_string()),
            ConfigKey::OutputColor => self.output.color.map(|c| c.to_string()),
        }
    }
}

/// Keys accepted by `lf config set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Listing,
    Cookies,
    RememberDays,
    OutputColor,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::Listing,
        ConfigKey::Cookies,
        ConfigKey::RememberDays,
        ConfigKey::OutputColor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Listing => "listing",
            ConfigKey::Cookies => "cookies",
            ConfigKey::RememberDays => "remember_days",
            ConfigKey::OutputColor => "output.color",
        }
    }

    /// Parses `value` and stores it in `config`.
    pub fn apply(&self, config: &mut Config, value: &str) -> Result<()> {
        match self {
            ConfigKey::Listing => config.listing = Some(PathBuf::from(value)),
            ConfigKey::Cookies => config.cookies = Some(PathBuf::from(value)),
            ConfigKey::RememberDays => {
                let days = value.parse::<i64>().map_err(|_| {
                    CommandError::Config(format!(
                        "remember_days must be a whole number of days, got '{value}'"
                    ))
                })?;
                let days = check_remember_days(days).map_err(CommandError::Config)?;
                config.remember_days = Some(days);
            }
            ConfigKey::OutputColor => config.output.color = Some(parse_switch(value)?),
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = ConfigKey::ALL.iter().map(ConfigKey::as_str).collect();
                CommandError::Config(format!(
                    "unknown config key '{s}' (expected one of: {})",
                    valid.join(", ")
                ))
            })
    }
}

/// Resolves the config file path.
///
/// `LF_CONFIG` wins, then `$XDG_CONFIG_HOME/lf`, then `~/.config/lf`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let base = match env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config"))
            .ok_or_else(|| CommandError::Config("cannot locate a home directory".to_string()))?,
    };
    Ok(base.join("lf").join("config.toml"))
}

/// Loads the config from the resolved path.
pub fn load_config() -> Result<Config> {
    Config::load_from(&get_config_path()?)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let config = Config::load_from(&path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    println!("{}", path.display());
    let width = ConfigKey::ALL.iter().map(|k| k.as_str().len()).max().unwrap_or(0);
    for key in ConfigKey::ALL {
        let value = match config.value_of(key) {
            Some(value) => value,
            None if ctx.use_colors => "(unset)".dimmed().to_string(),
            None => "(unset)".to_string(),
        };
        println!("  {:<width$}  {}", key.as_str(), value);
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    pub key: String,
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let key: ConfigKey = opts.key.parse()?;
    let path = get_config_path()?;

    let mut config = Config::load_from(&path)?;
    key.apply(&mut config, &opts.value)?;
    config.save_to(&path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "key": key.as_str(),
            "value": config.value_of(key),
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{key} = {}", opts.value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Accepts 0 (session only) up to [`MAX_REMEMBER_DAYS`].
fn check_remember_days(days: i64) -> std::result::Result<i64, String> {
    if (0..=MAX_REMEMBER_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(format!(
            "remember_days must be between 0 (session only) and {MAX_REMEMBER_DAYS}, got {days}"
        ))
    }
}

/// Parses an on/off setting.
fn parse_switch(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "expected on/off, true/false, yes/no or 1/0, got '{value}'"
        ))),
    }
}
