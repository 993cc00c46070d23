//! Integration tests for the `ucsm` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! config handling and exit codes, all without a live UCS Manager.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ucsm` binary with env isolation.
///
/// Clears all `UCSM_*` env vars, runs inside `dir` and points config
/// directories at a nonexistent path so tests never touch the user's real
/// configuration.
fn ucsm_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ucsm");
    cmd.current_dir(dir)
        .env("HOME", "/tmp/ucsm-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ucsm-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("UCSM_CONFIG")
        .env_remove("UCSM_OUTPUT")
        .env_remove("UCSM_HOST")
        .env_remove("UCSM_USERNAME")
        .env_remove("UCSM_PASSWORD")
        .env_remove("UCSM_TIMEOUT");
    cmd
}

fn write_config(dir: &Path, body: &str) {
    std::fs::write(dir.join("config.yaml"), body).unwrap();
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = ucsm_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let dir = tempfile::tempdir().unwrap();
    ucsm_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("UCS Manager")
            .and(predicate::str::contains("vlan"))
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    ucsm_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ucsm"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    ucsm_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let dir = tempfile::tempdir().unwrap();
    ucsm_cmd(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let output = ucsm_cmd(dir.path()).arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_vlan_id_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    for id in ["0", "5000", "abc"] {
        ucsm_cmd(dir.path()).args(["vlan", id]).assert().code(2);
    }
}

#[test]
fn test_invalid_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let output = ucsm_cmd(dir.path())
        .args(["--output", "invalid", "show", "groups"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_vlan_help_lists_flags() {
    let dir = tempfile::tempdir().unwrap();
    ucsm_cmd(dir.path())
        .args(["vlan", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--source")
                .and(predicate::str::contains("--target"))
                .and(predicate::str::contains("--dry-run")),
        );
}

// ── Reserved commands ───────────────────────────────────────────────

#[test]
fn test_system_is_not_implemented() {
    let dir = tempfile::tempdir().unwrap();
    ucsm_cmd(dir.path())
        .arg("system")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("not yet implemented"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_missing_host_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    ucsm_cmd(dir.path())
        .args(["vlan", "666", "--target", "CORP"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("host"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    ucsm_cmd(dir.path())
        .args(["--config", "nope.yaml", "show", "groups"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_path_prefers_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "host: ucs.example.com\n");
    ucsm_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_show_redacts_password() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        "host: ucs.example.com\nusername: admin\npassword: hunter2\ntimeout: 12\n",
    );
    ucsm_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ucs.example.com")
                .and(predicate::str::contains("(config)"))
                .and(predicate::str::contains("12s"))
                .and(predicate::str::contains("hunter2").not()),
        );
}

#[test]
fn test_config_show_json() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "host: ucs.example.com\nusername: admin\npassword: pw\n");
    ucsm_cmd(dir.path())
        .args(["-o", "json-compact", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""host":"ucs.example.com""#));
}

#[test]
fn test_env_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "host: file-host\nusername: admin\npassword: pw\n");
    ucsm_cmd(dir.path())
        .env("UCSM_HOST", "env-host")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("env-host"));
}

// ── Connection failures ─────────────────────────────────────────────

#[test]
fn test_unreachable_host_exits_with_connection_code() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        "host: http://127.0.0.1:1\nusername: admin\npassword: pw\ntimeout: 5\n",
    );
    ucsm_cmd(dir.path())
        .args(["show", "groups"])
        .assert()
        .code(7);
}
