//! CLI smoke tests: argument surface only, no network.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_describes_the_tool() {
    let mut cmd = Command::cargo_bin("deprisk").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dependency closure"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--no-vuln"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("deprisk").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deprisk"));
}

#[test]
fn test_missing_arguments_fail_with_usage() {
    let mut cmd = Command::cargo_bin("deprisk").unwrap();
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_ecosystem_rejected() {
    let mut cmd = Command::cargo_bin("deprisk").unwrap();
    cmd.args(["homebrew", "wget"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown ecosystem"));
}

#[test]
fn test_unknown_format_rejected() {
    let mut cmd = Command::cargo_bin("deprisk").unwrap();
    cmd.args(["npm", "lodash", "--format", "xml"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_config_file_not_found_errors() {
    let mut cmd = Command::cargo_bin("deprisk").unwrap();
    cmd.args(["npm", "lodash", "--config", "/nonexistent/deprisk.config.yml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config file"));
}
