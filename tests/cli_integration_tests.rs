//! Integration tests for the `cr` binary
//!
//! Most tests point the storage root at `tests/fixtures/sheets`, which
//! already holds sheets. `git` is replaced by a program that does not exist,
//! so tests starting from an empty root see every clone fail.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;

fn fixture_home() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sheets")
}

fn cr() -> Command {
    let mut cmd = Command::cargo_bin("cr").unwrap();
    cmd.env("CRYPTIC_RESOLVER_HOME", fixture_home())
        .env("CRYPTIC_RESOLVER_GIT", "cr-test-no-such-git")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

fn stdout_of(args: &[&str]) -> String {
    let output = cr().args(args).output().unwrap();
    assert!(output.status.success(), "cr {args:?} failed: {output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_lookup_scalar_entry() {
    cr().arg("emacs")
        .assert()
        .success()
        .stdout(predicate::str::contains("From: cryptic_computer"))
        .stdout(predicate::str::contains("Emacs: Editor MACroS"))
        .stdout(predicate::str::contains("A feature-rich editor"))
        .stdout(predicate::str::contains("SEE ALSO vim  nano"))
        .stdout(predicate::str::contains("Not found anything").not());
}

#[test]
fn test_lookup_is_case_insensitive() {
    cr().arg("EMACS")
        .assert()
        .success()
        .stdout(predicate::str::contains("Editor MACroS"));
}

#[test]
fn test_lookup_description_only_has_no_extra_blocks() {
    let stdout = stdout_of(&["eta"]);
    assert!(stdout.contains("From: cryptic_common"));
    assert!(stdout.contains("ETA: Estimated Time of Arrival"));
    assert!(!stdout.contains("SEE ALSO"));
}

#[test]
fn test_lookup_not_found_prints_only_the_hint() {
    let stdout = stdout_of(&["qwertyuiop"]);
    assert!(stdout.starts_with("cr: Not found anything."));
    assert!(!stdout.contains("From:"));
    assert!(stdout.contains("https://github.com/cryptic-resolver/cryptic_computer.git"));
    assert!(stdout.contains("`cr -u`"));
}

#[test]
fn test_lookup_meanings_separated_by_or() {
    let stdout = stdout_of(&["xdg"]);
    let or_lines = stdout.lines().filter(|l| l.trim() == "OR").count();
    assert_eq!(or_lines, 1);
    let config = stdout.find("XDG_CONFIG_HOME").unwrap();
    let data = stdout.find("XDG_DATA_HOME").unwrap();
    assert!(config < data);
}

#[test]
fn test_lookup_dotted_meaning() {
    let stdout = stdout_of(&["xdg.data"]);
    assert!(stdout.contains("XDG_DATA_HOME"));
    assert!(!stdout.contains("XDG_CONFIG_HOME"));
}

#[test]
fn test_lookup_missing_dotted_meaning_warns() {
    let stdout = stdout_of(&["xdg.download"]);
    assert!(stdout.contains("WARN:"));
    assert!(stdout.contains("`xdg`"));
    assert!(stdout.contains("x.toml"));
    assert!(stdout.contains("cryptic_computer"));
}

#[test]
fn test_lookup_follows_redirect_chain() {
    let stdout = stdout_of(&["vim"]);
    assert!(stdout.contains("vim redirects to vi"));
    assert!(stdout.contains("vi redirects to ex"));
    assert!(stdout.contains("ex: EXtended line editor"));
}

#[test]
fn test_lookup_broken_redirect_warns() {
    let stdout = stdout_of(&["gnu"]);
    assert!(stdout.contains("gnu redirects to gnome"));
    assert!(stdout.contains("WARN: Synonym jumps to a wrong place at `gnome`"));
    assert!(stdout.contains("cr: Not found anything."));
}

#[test]
fn test_lookup_redirect_cycle_terminates() {
    cr().arg("loop1")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("loop back on themselves"));
}

#[test]
fn test_lookup_digit_bucket() {
    cr().arg("404")
        .assert()
        .success()
        .stdout(predicate::str::contains("HTTP 404: Not Found"));
}

#[test]
fn test_lookup_primary_sheet_first() {
    let stdout = stdout_of(&["ide"]);
    let primary = stdout.find("From: cryptic_computer").unwrap();
    let other = stdout.find("From: a_local_sheet").unwrap();
    assert!(primary < other);
    assert!(stdout.contains("Integrated Development Environment"));
    assert!(stdout.contains("Intelligent Drive Electronics"));
}

#[test]
fn test_lookup_malformed_sheet_is_reported() {
    let stdout = stdout_of(&["make"]);
    assert!(stdout.contains("From: zz_broken"));
    assert!(stdout.contains("ERROR: Failed to parse"));
    assert!(stdout.contains("m.toml"));
    assert!(stdout.contains("cr: Not found anything."));
}

#[test]
fn test_lookup_jsonl() {
    let stdout = stdout_of(&["--format", "jsonl", "vi"]);
    let records: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["type"], "entry");
    assert_eq!(records[0]["sheet"], "cryptic_computer");
    assert_eq!(records[0]["redirects"][0]["from"], "vi");
    assert_eq!(records[0]["redirects"][0]["to"], "ex");
    assert_eq!(records[0]["meanings"][0]["description"], "EXtended line editor");
    assert_eq!(records[1]["type"], "status");
    assert_eq!(records[1]["found"], true);
}

#[test]
fn test_home_flag_overrides_env() {
    let empty = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(empty.path().join("cryptic_computer")).unwrap();

    cr().env("CRYPTIC_RESOLVER_HOME", empty.path())
        .arg("--home")
        .arg(fixture_home())
        .arg("emacs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Editor MACroS"));
}

#[test]
fn test_env_home_used_for_lookup() {
    let home = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(home.path().join("cryptic_computer")).unwrap();

    cr().env("CRYPTIC_RESOLVER_HOME", home.path())
        .arg("emacs")
        .assert()
        .success()
        .stdout(predicate::str::contains("cr: Not found anything."));
}

#[test]
fn test_help_flag() {
    cr().arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: cr"))
        .stdout(predicate::str::contains("--update"));
}

#[test]
fn test_no_arguments_prints_help() {
    cr().assert()
        .success()
        .stdout(predicate::str::contains("Usage: cr"))
        .stdout(predicate::str::contains("Adding default sheets").not());
}

#[test]
fn test_word_and_update_conflict() {
    cr().args(["emacs", "-u"]).assert().failure();
}

#[test]
fn test_jsonl_lookup_keeps_bootstrap_progress_off_stdout() {
    let home = tempfile::TempDir::new().unwrap();

    let output = cr()
        .arg("--home")
        .arg(home.path())
        .args(["--format", "jsonl", "emacs"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["type"], "status");
    assert_eq!(records[0]["found"], false);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cr: Adding default sheets..."));
    assert!(stderr.contains("cr: Add done"));
}

#[test]
fn test_human_lookup_prints_bootstrap_progress() {
    let home = tempfile::TempDir::new().unwrap();

    cr().arg("--home")
        .arg(home.path())
        .arg("emacs")
        .assert()
        .success()
        .stdout(predicate::str::contains("cr: Adding default sheets..."))
        .stdout(predicate::str::contains("cr: Not found anything."));
}

#[test]
fn test_update_with_failing_git_exits_non_zero() {
    let home = tempfile::TempDir::new().unwrap();

    cr().arg("--home")
        .arg(home.path())
        .arg("-u")
        .assert()
        .failure()
        .stdout(predicate::str::contains("cr: Adding default sheets..."))
        .stderr(predicate::str::contains("5 sheet operation(s) failed"));
}

#[test]
fn test_lookup_malformed_entry_warns_without_hiding_neighbours() {
    let stdout = stdout_of(&["eol"]);
    assert!(stdout.contains("WARN: Malformed entry `eol`"));
    assert!(stdout.contains("e.toml"));
    assert!(!stdout.contains("ERROR:"));

    assert!(stdout_of(&["emacs"]).contains("Editor MACroS"));
}
