//! CLI surface tests: help text, version, argument validation

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn envprep() -> Command {
    Command::cargo_bin("envprep").expect("Failed to find envprep binary")
}

#[test]
fn test_help_lists_commands() {
    envprep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bootstrap"))
        .stdout(predicate::str::contains("purge"))
        .stdout(predicate::str::contains("doctor"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_bootstrap_help_lists_flags() {
    envprep()
        .args(["bootstrap", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--skip-runtime-check"))
        .stdout(predicate::str::contains("--skip-validation"))
        .stdout(predicate::str::contains("--no-deps-check"))
        .stdout(predicate::str::contains("--manifest"));
}

#[test]
fn test_version_flag() {
    envprep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_hidden_version_command() {
    envprep()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("envprep"))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("Target:"));
}

#[test]
fn test_unknown_subcommand_fails() {
    envprep()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_unknown_flag_fails() {
    envprep()
        .args(["bootstrap", "--definitely-not-a-flag"])
        .assert()
        .failure();
}

#[test]
fn test_completions_bash_generates_script() {
    envprep()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("envprep"));
}

#[test]
fn test_completions_unknown_shell_fails() {
    envprep()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}
