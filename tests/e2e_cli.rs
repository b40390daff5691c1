//! CLI end-to-end tests
//!
//! Tests for the mkvkit command-line interface. None of them needs
//! mkvtoolnix: they stop at argument, config or input validation.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the mkvkit binary
#[allow(deprecated)]
fn mkvkit_cmd() -> Command {
    Command::cargo_bin("mkvkit").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = mkvkit_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = mkvkit_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mkvkit"))
        .stdout(predicate::str::contains("explode"))
        .stdout(predicate::str::contains("attachments"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = mkvkit_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mkvkit"));
}

#[test]
fn test_cli_check_tools_command() {
    let mut cmd = mkvkit_cmd();
    cmd.arg("check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("mkvmerge"))
        .stdout(predicate::str::contains("mkvextract"));
}

#[test]
fn test_cli_explode_help() {
    let mut cmd = mkvkit_cmd();
    cmd.args(["explode", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract the wanted tracks"))
        .stdout(predicate::str::contains("--no-chapters"));
}

#[test]
fn test_cli_attachments_help() {
    let mut cmd = mkvkit_cmd();
    cmd.args(["attachments", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("fix"));
}

#[test]
fn test_cli_explode_missing_file() {
    let dir = tempdir().unwrap();
    let mut cmd = mkvkit_cmd();
    cmd.arg("explode")
        .arg(dir.path().join("missing.mkv"))
        .assert()
        .failure();
}

#[test]
fn test_cli_explode_rejects_bad_language() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.mkv");
    fs::write(&file, b"").unwrap();

    let mut cmd = mkvkit_cmd();
    cmd.arg("explode")
        .arg(&file)
        .args(["-a", "english"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid audio languages"));
}

#[test]
fn test_cli_explode_rejects_empty_selection() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.mkv");
    fs::write(&file, b"").unwrap();

    let mut cmd = mkvkit_cmd();
    cmd.arg("explode")
        .arg(&file)
        .args(["--no-video", "--no-audio", "--no-subtitles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no track category wanted"));
}

#[test]
fn test_cli_attachments_extract_empty_dir() {
    let dir = tempdir().unwrap();
    let mut cmd = mkvkit_cmd();
    cmd.args(["attachments", "extract"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Matroska files"));
}

#[test]
fn test_cli_attachments_delete_bad_kind() {
    let dir = tempdir().unwrap();
    let mut cmd = mkvkit_cmd();
    cmd.args(["attachments", "delete", "-t", "video"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown attachment type"));
}

#[test]
fn test_cli_chapters_check_missing_input() {
    let dir = tempdir().unwrap();
    let mut cmd = mkvkit_cmd();
    cmd.args(["chapters", "check"])
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input does not exist"));
}

#[test]
fn test_cli_tag_rejects_bad_language() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.mkv");
    fs::write(&file, b"").unwrap();

    let mut cmd = mkvkit_cmd();
    cmd.arg("tag")
        .arg(&file)
        .args(["-y", "jp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("three letter language code"));
}

#[test]
fn test_cli_validate_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("mkvkit.toml");
    fs::write(
        &config,
        "jobs = 2\n\n[explode]\nsubtitle_types = \"all\"\n",
    )
    .unwrap();

    let mut cmd = mkvkit_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Workers: 2"));
}

#[test]
fn test_cli_invalid_config_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[explode]\nsubtitle_types = \"bluray\"\n").unwrap();
    let file = dir.path().join("a.mkv");
    fs::write(&file, b"").unwrap();

    let mut cmd = mkvkit_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("explode")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_cli_chapters_add_count_mismatch() {
    let dir = tempdir().unwrap();
    for name in ["a.mkv", "b.mkv", "a.xml"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let mut cmd = mkvkit_cmd();
    cmd.args(["chapters", "add", "--dry-run"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 chapter files and 2 video files"));
}
