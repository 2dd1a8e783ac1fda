//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_serve() {
    let mut cmd = Command::cargo_bin("contactd").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("contactd").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Deployment mode"))
        .stdout(predicate::str::contains("per-invocation"))
        .stdout(predicate::str::contains("--memory"));
}

#[test]
fn test_always_on_without_database_url_exits_nonzero() {
    let mut cmd = Command::cargo_bin("contactd").unwrap();
    cmd.arg("serve")
        .arg("--mode")
        .arg("always-on")
        .arg("--port")
        .arg("0")
        .env_remove("DATABASE_URL")
        .env("CONTACTD_ENV", "production");

    cmd.assert().failure().code(1);
}

#[test]
fn test_rejects_unknown_mode() {
    let mut cmd = Command::cargo_bin("contactd").unwrap();
    cmd.arg("serve").arg("--mode").arg("sometimes");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
