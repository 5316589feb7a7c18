//! CLI end-to-end tests for the `lf` binary.
//!
//! Each test works in its own temp directory holding the listing, the
//! cookie file and the config file, so nothing touches the user's data.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const LISTING: &str = r#"{
    "title": "Scala Library",
    "kinds": ["class", "object", "trait"],
    "items": [
        { "name": "Buffer", "package": "scala.collection.mutable", "kind": "class" },
        { "name": "ArrayBuffer", "package": "scala.collection.mutable", "kind": "class" },
        { "name": "Iterable", "package": "scala.collection", "kind": "trait" },
        { "name": "Nil", "package": "scala.collection.immutable", "kind": "object" },
        { "name": "Either", "package": "scala.util", "kind": "class" }
    ]
}"#;

struct CliEnv {
    dir: TempDir,
}

impl CliEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::write(dir.path().join("listing.json"), LISTING).expect("failed to write listing");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_lf"))
            .args(args)
            .env("LF_LISTING", self.path("listing.json"))
            .env("LF_COOKIES", self.path("cookies.json"))
            .env("LF_CONFIG", self.path("config.toml"))
            .env_remove("LF_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("failed to run lf")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "lf {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("stdout is not utf-8")
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        serde_json::from_str(&self.run_ok(&full)).expect("stdout is not JSON")
    }
}

fn names(output: &Value) -> Vec<String> {
    output["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|i| i["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn read_cookies(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("cookie file missing"))
        .expect("cookie file is not JSON")
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_table_shows_everything() {
    let env = CliEnv::new();
    let stdout = env.run_ok(&["--no-color", "list"]);

    assert!(stdout.contains("Name"));
    assert!(stdout.contains("ArrayBuffer"));
    assert!(stdout.contains("5 of 5 items shown"));
}

#[test]
fn test_list_json_filters() {
    let env = CliEnv::new();
    let output = env.run_json(&["list", "-p", "scala.collection.mutable", "-n", "Arr"]);

    assert_eq!(output["title"], "Scala Library");
    assert_eq!(output["total"], 5);
    assert_eq!(output["visible"], 1);
    assert_eq!(names(&output), vec!["ArrayBuffer"]);
    assert_eq!(output["filters"]["name"], "Arr");
}

#[test]
fn test_list_hide_kind_and_show_kind() {
    let env = CliEnv::new();

    let output = env.run_json(&["list", "--hide-kind", "class"]);
    assert_eq!(names(&output), vec!["Iterable", "Nil"]);

    let output = env.run_json(&["list", "-k", "object"]);
    assert_eq!(names(&output), vec!["Nil"]);
}

#[test]
fn test_list_unknown_package_warns_and_shows_all() {
    let env = CliEnv::new();
    let output = env.run(&["--json", "list", "-p", "scala.utl"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown package 'scala.utl'. Did you mean 'scala.util'?"));

    let stdout: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout["visible"], 5);
}

#[test]
fn test_list_regex_flag_persists() {
    let env = CliEnv::new();

    let output = env.run_json(&["list", "--regex", "-n", "^[A-Z][a-z]+$"]);
    assert_eq!(names(&output), vec!["Buffer", "Iterable", "Nil", "Either"]);
    assert!(env.path("cookies.json").exists());

    // Stored option applies without the flag
    let output = env.run_json(&["list", "-n", ".*Buffer"]);
    assert_eq!(names(&output), vec!["Buffer", "ArrayBuffer"]);
    assert_eq!(output["filters"]["regex"], true);
}

#[test]
fn test_list_invalid_regex_lists_everything() {
    let env = CliEnv::new();
    let output = env.run_json(&["list", "--regex", "-n", "Buf("]);

    assert_eq!(output["visible"], 5);
    assert!(output["filters"]["pattern_error"].is_string());
}

#[test]
fn test_list_missing_listing_fails() {
    let env = CliEnv::new();
    let missing = env.path("missing.json");
    let output = env.run(&["--json", "--listing", missing.to_str().unwrap(), "list"]);

    assert_eq!(output.status.code(), Some(1));
    let error: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"]["code"], "LISTING_ERROR");
}

// ============================================================================
// packages / kinds
// ============================================================================

#[test]
fn test_packages_json() {
    let env = CliEnv::new();
    let output = env.run_json(&["packages"]);

    let packages = output["packages"].as_array().unwrap();
    assert_eq!(packages.len(), 4);
    assert_eq!(packages[0]["name"], "scala.collection.mutable");
    assert_eq!(packages[0]["count"], 2);
}

#[test]
fn test_kinds_table() {
    let env = CliEnv::new();
    let stdout = env.run_ok(&["--no-color", "kinds"]);

    assert!(stdout.contains("class"));
    assert!(stdout.contains("trait"));
}

// ============================================================================
// options
// ============================================================================

#[test]
fn test_options_toggle_then_list() {
    let env = CliEnv::new();

    let toggled = env.run_json(&["options", "toggle", "ignore-case"]);
    assert_eq!(toggled["enabled"], true);

    let cookies = read_cookies(&env.path("cookies.json"));
    assert!(cookies.to_string().contains("filter4NameIgnoreCase"));

    let output = env.run_json(&["list", "-n", "arr"]);
    assert_eq!(names(&output), vec!["ArrayBuffer"]);
    assert_eq!(output["filters"]["ignore_case"], true);
}

#[test]
fn test_options_reset() {
    let env = CliEnv::new();
    env.run_ok(&["options", "toggle", "regex"]);
    assert!(env.path("cookies.json").exists());
    env.run_ok(&["options", "reset"]);
    assert!(!env.path("cookies.json").exists());

    let output = env.run_json(&["options", "show"]);
    let options = output["options"].as_array().unwrap();
    assert!(options.iter().all(|o| o["enabled"] == false));
}

#[test]
fn test_options_toggle_unknown_name() {
    let env = CliEnv::new();
    let output = env.run(&["options", "toggle", "fuzzy"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!env.path("cookies.json").exists());
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_set_listing() {
    let env = CliEnv::new();
    let listing = env.path("listing.json");
    env.run_ok(&["config", "set", "listing", listing.to_str().unwrap()]);

    let config = fs::read_to_string(env.path("config.toml")).unwrap();
    assert!(config.contains("listing"));

    let output = Command::new(env!("CARGO_BIN_EXE_lf"))
        .args(["--json", "packages"])
        .env_remove("LF_LISTING")
        .env("LF_COOKIES", env.path("cookies.json"))
        .env("LF_CONFIG", env.path("config.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());
}
