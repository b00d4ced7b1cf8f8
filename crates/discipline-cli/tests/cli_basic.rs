//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "discipline-cli", "--"])
        .args(args)
        .env("DISCIPLINE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_show() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    assert!(stdout.contains("daily_target_hours"));
    assert!(stdout.contains("default_focus"));
}

#[test]
fn test_config_set_target() {
    let (stdout, _, code) = run_cli(&["config", "set-target", "5"]);
    assert_eq!(code, 0, "config set-target failed");
    assert!(stdout.contains("5h"));
}

#[test]
fn test_config_set_target_rejects_invalid() {
    let (_, stderr, code) = run_cli(&["config", "set-target", "7"]);
    assert_ne!(code, 0, "set-target 7 unexpectedly succeeded");
    assert!(stderr.contains("Invalid value"));
}

#[test]
fn test_log_list_json() {
    let (stdout, _, code) = run_cli(&["log", "list", "--json"]);
    assert_eq!(code, 0, "log list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("log list --json did not print JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_log_stats() {
    let (stdout, _, code) = run_cli(&["log", "stats"]);
    assert_eq!(code, 0, "log stats failed");
    assert!(stdout.contains("total check-ins"));
}
