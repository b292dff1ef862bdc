//! CLI smoke tests for the wp binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write a config file pointing storage at a temp directory
fn config_file(dir: &TempDir) -> std::path::PathBuf {
    let data_dir = dir.path().join("weeks");
    let config_path = dir.path().join("weekplan.yml");
    let yaml = format!("storage:\n  data-dir: {}\n", data_dir.display());
    std::fs::write(&config_path, yaml).expect("write config");
    config_path
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("wp")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("weeks"));
}

#[test]
fn test_weeks_on_fresh_store_is_empty() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_file(&dir);

    Command::cargo_bin("wp")
        .expect("binary exists")
        .args(["--config", config.to_str().unwrap(), "weeks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No weeks stored yet"));
}

#[test]
fn test_show_resolves_date_to_its_monday() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_file(&dir);

    // 2024-06-05 is a Wednesday; its week id is Monday 2024-06-03
    Command::cargo_bin("wp")
        .expect("binary exists")
        .args([
            "--config",
            config.to_str().unwrap(),
            "show",
            "--week",
            "2024-06-05",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"weekId\": \"2024-06-03\""));
}

#[test]
fn test_show_rejects_bad_date() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_file(&dir);

    Command::cargo_bin("wp")
        .expect("binary exists")
        .args(["--config", config.to_str().unwrap(), "show", "--week", "june-ish"])
        .assert()
        .failure();
}
