//! Integration tests for argument parsing and the diagnostic flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn nanda() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nanda-sdk"));
    cmd.env("NO_COLOR", "1")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("SMITHERY_API_KEY")
        .env_remove("NANDA_PLAYBOOK")
        .env("NANDA_CONFIG", "/nonexistent/nanda-config.yaml");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_help_flag_shows_help() {
    nanda()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--anthropic-key"))
        .stdout(predicate::str::contains("--domain"))
        .stdout(predicate::str::contains("--num-agents"))
        .stdout(predicate::str::contains("--check-ansible"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    nanda()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nanda-sdk"));
}

// --- Required arguments ---

#[test]
fn test_cli_no_args_is_usage_error() {
    nanda()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--anthropic-key"));
}

#[test]
fn test_cli_missing_domain_is_usage_error() {
    nanda()
        .args(["--anthropic-key", "sk-ant-test"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--domain"));
}

#[test]
fn test_cli_rejects_non_numeric_agent_id() {
    nanda()
        .args([
            "--anthropic-key",
            "sk-ant-test",
            "--domain",
            "x.example.com",
            "--agent-id",
            "abc",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_cli_zero_agents_fails() {
    nanda()
        .args([
            "--anthropic-key",
            "sk-ant-test",
            "--domain",
            "x.example.com",
            "--num-agents",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number of agents"));
}

// --- Diagnostics ---

#[test]
fn test_check_ansible_needs_no_other_args() {
    nanda()
        .arg("--check-ansible")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ansible"));
}

#[test]
fn test_check_install_needs_no_other_args() {
    nanda().arg("--check-install").assert().success();
}

#[test]
fn test_malformed_config_file_is_reported() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "artifacts: [1, 2]\n").expect("write");
    nanda()
        .env("NANDA_CONFIG", &path)
        .arg("--check-ansible")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}
