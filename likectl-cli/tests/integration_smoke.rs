//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("likectl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("likectl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--in-memory"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_seed_help() {
    let mut cmd = Command::cargo_bin("likectl").unwrap();
    cmd.arg("seed").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Number of companies"));
}

#[test]
fn test_seed_rejects_zero_companies() {
    let mut cmd = Command::cargo_bin("likectl").unwrap();
    cmd.arg("seed").arg("--companies").arg("0");

    cmd.assert().failure();
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("likectl").unwrap();
    cmd.arg("frobnicate");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
