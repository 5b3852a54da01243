//! Tests for error handling and CLI flags.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("opsync") || out.contains("Usage"));
    assert!(out.contains("push"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("opsync "));
}

#[test]
fn test_completions_bash() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_opsync") || out.contains("complete"));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "zsh"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "#compdef opsync");
}

#[test]
fn test_completions_fish() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "fish"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("complete") && out.contains("opsync"));
}

#[test]
fn test_completions_ignore_broken_config() {
    let t = Test::new();
    t.write(".opsync.toml", "not = [valid");

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
}

#[test]
fn test_missing_explicit_config() {
    let t = Test::new();

    t.cmd()
        .args(["--config", "nope.toml", "accounts"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found: nope.toml"));
}

#[test]
fn test_malformed_config() {
    let t = Test::new();
    t.write(".opsync.toml", "[op\naccount = 1\n");

    let output = t.run(&["accounts"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config .opsync.toml");
}

#[test]
fn test_unknown_config_key() {
    let t = Test::new();
    t.write(".opsync.toml", "[op]\nacount = \"typo\"\n");

    let output = t.run(&["accounts"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_missing_op_binary() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);
    t.write(
        ".opsync.toml",
        "[op]\naccount = \"acme.1password.com\"\nvault = \"Infra\"\nprogram = \"/nonexistent/bin/op\"\n",
    );

    let output = t.push_env(".env", "prod-db", &[]);

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "/nonexistent/bin/op not found on PATH");
    assert_stdout_contains(&output, "install the 1Password CLI");
    assert!(!t.path(".env.tpl").exists());
}

#[test]
fn test_invalid_manifest_name() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t.push_env(".env", "Prod DB", &["--format", "manifest"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret name 'Prod DB'");
}

#[test]
fn test_require_existing_conflicts_with_overwrite() {
    let t = Test::new();

    t.cmd()
        .args(["push", "env", ".env", "--item", "prod-db", "--overwrite", "--require-existing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}
