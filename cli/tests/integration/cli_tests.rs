//! Integration tests for the launchkit CLI surface
//!
//! These tests verify the CLI structure and argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn launchkit() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("launchkit"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    launchkit().assert().code(2).stderr(predicate::str::contains(
        "Manage launchd daemons, agents and login items",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    let assert = launchkit().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for cmd in [
        "list",
        "info",
        "print",
        "bootstrap",
        "bootout",
        "enable",
        "disable",
        "kickstart",
        "kill",
        "config",
        "version",
    ] {
        assert!(stdout.contains(cmd), "help is missing `{cmd}`:\n{stdout}");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    launchkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("launchkit"));
}

#[test]
fn test_version_command_shows_version() {
    launchkit()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "launchkit {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = launchkit().args(["version", "--json"]).assert().success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

// --- Argument validation ---

#[test]
fn test_unknown_command_fails() {
    launchkit()
        .arg("launch")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_info_requires_service() {
    launchkit()
        .arg("info")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<SERVICE>"));
}

#[test]
fn test_bootout_rejects_service_and_plist_together() {
    launchkit()
        .args(["bootout", "com.example.agent", "--plist", "/tmp/a.plist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_bootout_requires_service_or_plist() {
    launchkit().arg("bootout").assert().code(2);
}

#[test]
fn test_kill_rejects_unknown_signal() {
    launchkit()
        .args(["kill", "NOPE", "com.example.agent"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NOPE"));
}

#[test]
fn test_invalid_domain_is_reported() {
    launchkit()
        .args(["--domain", "galaxy/1", "list"])
        .env("LAUNCHKIT_CONFIG", "/nonexistent/launchkit/config.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid domain 'galaxy/1'"));
}

#[test]
fn test_invalid_service_target_is_reported() {
    launchkit()
        .args(["--domain", "system", "info", "moon/1/com.example.agent"])
        .env("LAUNCHKIT_CONFIG", "/nonexistent/launchkit/config.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid service target"));
}
