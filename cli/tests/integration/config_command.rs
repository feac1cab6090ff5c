//! Integration tests for `launchkit config`.
//!
//! All filesystem-touching tests set `LAUNCHKIT_CONFIG` to a temp path so
//! they never read or write `~/.launchkit/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn launchkit(config: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("launchkit"));
    cmd.env("NO_COLOR", "1")
        .env("LAUNCHKIT_CONFIG", config)
        .env_remove("LAUNCHKIT_DOMAIN");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    let (_dir, path) = temp_config_path();
    launchkit(&path)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    launchkit(&path)
        .args(["--domain", "system", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/bin/launchctl"))
        .stdout(predicate::str::contains("launchctl.timeout_secs"))
        .stdout(predicate::str::contains("LAUNCHKIT_CONFIG"));
}

#[test]
fn test_config_show_does_not_create_file() {
    let (_dir, path) = temp_config_path();
    launchkit(&path)
        .args(["--domain", "system", "config", "show"])
        .assert()
        .success();
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_persists_value() {
    let (_dir, path) = temp_config_path();
    launchkit(&path)
        .args(["--domain", "system", "config", "set", "launchctl.timeout_secs", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set launchctl.timeout_secs = 5"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("timeout_secs: 5"), "got: {content}");
}

#[test]
fn test_config_set_default_domain_then_show_json() {
    let (_dir, path) = temp_config_path();
    launchkit(&path)
        .args(["config", "set", "domain.default", "user/501"])
        .assert()
        .success();

    let assert = launchkit(&path)
        .args(["--json", "config", "show"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["config"]["domain"]["default"], "user/501");
    assert_eq!(value["path"], path.as_str());
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    launchkit(&path)
        .args(["--domain", "system", "config", "set", "security.level", "strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: security.level"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_value_fails() {
    let (_dir, path) = temp_config_path();
    launchkit(&path)
        .args(["--domain", "system", "config", "set", "launchctl.timeout_secs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for launchctl.timeout_secs"));
}

#[test]
fn test_config_set_unknown_key_json_error() {
    let (_dir, path) = temp_config_path();
    let assert = launchkit(&path)
        .args(["--json", "--domain", "system", "config", "set", "nope", "1"])
        .assert()
        .failure();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert!(value.get("code").is_none());
}

#[test]
fn test_config_ignores_invalid_domain_environment() {
    let (_dir, path) = temp_config_path();
    launchkit(&path)
        .env("LAUNCHKIT_DOMAIN", "galaxy/1")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("domain.default"));

    launchkit(&path)
        .env("LAUNCHKIT_DOMAIN", "galaxy/1")
        .args(["config", "set", "domain.default", "system"])
        .assert()
        .success();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("default: system"), "got: {content}");
}

#[test]
fn test_zero_timeout_in_file_is_rejected_before_running() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "launchctl:\n  timeout_secs: 0\n").unwrap();

    launchkit(&path)
        .args(["--domain", "system", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for launchctl.timeout_secs"));

    launchkit(&path)
        .args(["config", "show"])
        .assert()
        .success();
    launchkit(&path)
        .args(["config", "set", "launchctl.timeout_secs", "5"])
        .assert()
        .success();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("timeout_secs: 5"), "got: {content}");
}
