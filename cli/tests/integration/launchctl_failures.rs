//! End-to-end error reporting with stand-in `launchctl` programs.
//!
//! The configuration points `launchctl.path` at small system utilities so
//! the binary's classification and JSON error output can be checked on any
//! Unix host.

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A config directory whose `launchctl.path` is `program`.
fn config_with_launchctl(program: &str) -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        format!("launchctl:\n  path: {program}\n  timeout_secs: 10\ndomain:\n  default: system\n"),
    )
    .expect("write config");
    (dir, path.to_string_lossy().into_owned())
}

fn launchkit(config: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("launchkit"));
    cmd.env("NO_COLOR", "1")
        .env("LAUNCHKIT_CONFIG", config)
        .env_remove("LAUNCHKIT_DOMAIN")
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(assert: &assert_cmd::assert::Assert) -> serde_json::Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON")
}

#[test]
fn test_rejected_exit_status_is_reported_with_code() {
    let (_dir, config) = config_with_launchctl("/usr/bin/false");
    let assert = launchkit(&config)
        .args(["--json", "enable", "com.example.agent"])
        .assert()
        .failure();
    let value = json_stdout(&assert);
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], 1);
}

#[test]
fn test_rejected_exit_status_human_message() {
    let (_dir, config) = config_with_launchctl("/usr/bin/false");
    launchkit(&config)
        .args(["disable", "com.example.agent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: launchctl failed (1)"));
}

#[test]
fn test_list_of_empty_dump_is_invalid_property_list() {
    let (_dir, config) = config_with_launchctl("/usr/bin/true");
    let assert = launchkit(&config).args(["--json", "list"]).assert().failure();
    let value = json_stdout(&assert);
    assert_eq!(value["code"], 109);
    assert_eq!(value["description"], "Invalid property list");
    assert_eq!(value["diagnostic"], "No services dict found.");
}

#[test]
fn test_info_of_unrecognized_dump_is_invalid_property_list() {
    let (_dir, config) = config_with_launchctl("/bin/echo");
    let assert = launchkit(&config)
        .args(["--json", "info", "com.example.agent"])
        .assert()
        .failure();
    let value = json_stdout(&assert);
    assert_eq!(value["code"], 109);
    assert_eq!(
        value["diagnostic"],
        "Unsupported description of system/com.example.agent."
    );
}

#[test]
fn test_print_passes_target_to_launchctl() {
    let (_dir, config) = config_with_launchctl("/bin/echo");
    launchkit(&config)
        .args(["print", "gui/501/com.example.agent"])
        .assert()
        .success()
        .stdout("print gui/501/com.example.agent\n");
}

#[test]
fn test_kickstart_kill_flag_reaches_launchctl() {
    let (_dir, config) = config_with_launchctl("/bin/echo");
    launchkit(&config)
        .args(["--json", "kickstart", "-k", "com.example.agent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("system/com.example.agent"));
}

#[test]
fn test_missing_launchctl_binary_is_invocation_error() {
    let (_dir, config) = config_with_launchctl("/nonexistent/launchctl");
    let assert = launchkit(&config)
        .args(["--json", "print"])
        .assert()
        .failure();
    let value = json_stdout(&assert);
    // ENOENT
    assert_eq!(value["code"], 2);
}
