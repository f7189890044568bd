//! Command-line tests for both binaries

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ranker() -> Command {
    let mut cmd = Command::cargo_bin("cosense-ranker").unwrap();
    cmd.env_remove("COSENSE_SID");
    cmd
}

#[test]
fn test_help_lists_flags() {
    ranker()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--check-links"))
        .stdout(predicate::str::contains("--username"));
}

#[test]
fn test_missing_page_prints_usage() {
    ranker()
        .assert()
        .failure()
        .stdout(predicate::str::contains("no page specified"))
        .stdout(predicate::str::contains("--page PROJECT/PAGE"));
}

#[test]
fn test_invalid_page_spec() {
    for spec in ["yasulab", "/README", "yasulab/"] {
        ranker()
            .args(["--page", spec])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Invalid format"));
    }
}

#[test]
fn test_invalid_config_is_rejected_before_fetching() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("ranker.toml");
    std::fs::write(&config, "[rate-limit]\nfetch-delay-ms = 1\n").unwrap();

    ranker()
        .args(["--page", "proj/Hub", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration error"));
}

#[test]
fn test_converter_missing_input() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("convert-ranking")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("result.txt"));
}

#[test]
fn test_converter_writes_table() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.txt");
    let output = dir.path().join("table.txt");
    std::fs::write(
        &input,
        "🏆 Commenter Ranking:\n\n 1. alice               :   3 ███\n 2. bob                 :   1 █\n============================================================\n",
    )
    .unwrap();

    Command::cargo_bin("convert-ranking")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries converted: 2"))
        .stdout(predicate::str::contains("1\talice\t3"));

    let table = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        table,
        "table:comment-ranking\nrank\tname\tcomments\n1\talice\t3\n2\tbob\t1"
    );
}

#[test]
fn test_converter_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("result.txt");
    let output = dir.path().join("cosense.txt");
    std::fs::write(
        &input,
        "🏆 Commenter Ranking:\n\n 1. team:1              :   5 █████\n============================================================\n",
    )
    .unwrap();

    Command::cargo_bin("convert-ranking")
        .unwrap()
        .arg("-v")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tteam:1\t5"))
        .stderr(predicate::str::contains("Wrote 1 rows"));
}

#[test]
fn test_converter_rejects_report_without_ranking() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("result.txt");
    std::fs::write(&input, "No comments found\n").unwrap();

    Command::cargo_bin("convert-ranking")
        .unwrap()
        .arg(&input)
        .arg(dir.path().join("cosense.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("ranking section not found"));
}
