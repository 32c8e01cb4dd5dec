//! Binary smoke tests. The menu itself needs a terminal, so these stay
//! on the non-interactive surface.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_options() {
    Command::cargo_bin("swagrec")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--workdir"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_version() {
    Command::cargo_bin("swagrec")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rejects_unknown_flag() {
    Command::cargo_bin("swagrec")
        .unwrap()
        .arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-such-flag"));
}
