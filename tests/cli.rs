//! CLI integration tests for the `babble` binary.
//!
//! Uses `assert_cmd` to spawn the binary as a subprocess and assert on
//! stdout/stderr/exit code.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn babble_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_babble"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn help_flag() {
    babble_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Markov chain"));
}

#[test]
fn input_is_required() {
    babble_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn missing_input_file_fails() {
    babble_cmd()
        .args(["--input", "no/such/file.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn prints_requested_number_of_sentences() {
    babble_cmd()
        .args(["--seed", "42", "--count", "4", "--input"])
        .arg(fixture("tweets.csv"))
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            out.lines().count() == 4 && out.lines().all(|l| l.ends_with('.'))
        }));
}

#[test]
fn same_seed_same_output() {
    let run = || {
        babble_cmd()
            .args(["--seed", "7", "--count", "5", "--input"])
            .arg(fixture("tweets.csv"))
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn config_file_is_honoured() {
    babble_cmd()
        .arg("--config")
        .arg(fixture("babble.ron"))
        .arg("--input")
        .arg(fixture("tweets.csv"))
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            out.lines().count() == 3 && out.lines().all(|l| l.split(' ').count() >= 2)
        }));
}

#[test]
fn flags_override_config() {
    babble_cmd()
        .arg("--config")
        .arg(fixture("babble.ron"))
        .args(["--count", "1", "--input"])
        .arg(fixture("tweets.csv"))
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| out.lines().count() == 1));
}

#[test]
fn dump_model_prints_tables() {
    babble_cmd()
        .args(["--seed", "1", "--count", "0", "--dump-model", "--input"])
        .arg(fixture("tweets.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("startTokens: {"))
        .stdout(predicate::str::contains("\"cold\":\t{ \"<END>\":1 }"));
}

#[test]
fn writes_and_appends_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("generated.txt");

    babble_cmd()
        .args(["--seed", "3", "--count", "2", "--input"])
        .arg(fixture("tweets.csv"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(std::fs::read_to_string(&out).unwrap().lines().count(), 2);

    babble_cmd()
        .args(["--seed", "3", "--count", "3", "--append", "--input"])
        .arg(fixture("tweets.csv"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&out).unwrap().lines().count(), 5);
}

#[test]
fn empty_column_reports_no_training_data() {
    babble_cmd()
        .args(["--column", "9", "--input"])
        .arg(fixture("tweets.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no training data"));
}

#[test]
fn failure_is_reported_once() {
    babble_cmd()
        .env("RUST_LOG", "info")
        .args(["--column", "9", "--input"])
        .arg(fixture("tweets.csv"))
        .assert()
        .failure()
        .stderr(predicate::function(|err: &str| {
            err.matches("no training data").count() == 1
        }));
}
