use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn converge_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("converge"))
}

// An unroutable address: connections fail immediately, which exercises the
// static-fallback paths without touching the network.
const DEAD_BUCKET: &str = "http://127.0.0.1:1/converge-signals";
const DEAD_API: &str = "http://127.0.0.1:1";

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    converge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("converge.zone"));
}

#[test]
fn test_version() {
    converge_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("converge"));
}

// =============================================================================
// Rules validation
// =============================================================================

#[test]
fn test_validate_local_accepts_well_formed_rules() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("rules.feature");
    std::fs::write(
        &file,
        "Feature: Refunds\n  Given an order\n  When cancelled\n  Then refund is issued\n",
    )
    .unwrap();

    converge_cmd()
        .args(["validate", "--local"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_validate_local_rejects_unstructured_text() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("rules.feature");
    std::fs::write(&file, "this might be a rule, probably\n").unwrap();

    converge_cmd()
        .args(["validate", "--local"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("invalid")
                .and(predicate::str::contains("Then"))
                .and(predicate::str::contains("Uncertain language")),
        );
}

#[test]
fn test_validate_local_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("rules.feature");
    std::fs::write(&file, "no structure\n").unwrap();

    converge_cmd()
        .args(["validate", "--local", "--json"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("\"is_valid\": false")
                .and(predicate::str::contains("\"confidence\": 0.5")),
        );
}

#[test]
fn test_validate_falls_back_when_api_unreachable() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("rules.feature");
    std::fs::write(
        &file,
        "Feature: Refunds\n  Given an order\n  When cancelled\n  Then refund is issued\n",
    )
    .unwrap();

    converge_cmd()
        .env("CONVERGE_API_URL", DEAD_API)
        .arg("validate")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("local mode"));
}

#[test]
fn test_validate_missing_file_fails() {
    converge_cmd()
        .args(["validate", "--local", "/definitely/not/here.feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read rules"));
}

// =============================================================================
// Signals (static fallback)
// =============================================================================

#[test]
fn test_signals_list_falls_back_to_bundled_articles() {
    converge_cmd()
        .env("CONVERGE_SIGNALS_BUCKET_URL", DEAD_BUCKET)
        .args(["signals", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("context-is-the-api")
                .and(predicate::str::contains("(static)")),
        );
}

#[test]
fn test_signals_show_bundled_article() {
    converge_cmd()
        .env("CONVERGE_SIGNALS_BUCKET_URL", DEAD_BUCKET)
        .args(["signals", "show", "evals-hidden-moat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Evals"));
}

#[test]
fn test_signals_show_unknown_slug_fails() {
    converge_cmd()
        .env("CONVERGE_SIGNALS_BUCKET_URL", DEAD_BUCKET)
        .args(["signals", "show", "no-such-article"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-article"));
}

// =============================================================================
// Stored requests
// =============================================================================

#[test]
fn test_requests_list_empty_store() {
    let temp_dir = TempDir::new().unwrap();

    converge_cmd()
        .env("CONVERGE_DATA_PATH", temp_dir.path())
        .args(["requests", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No demo requests stored"));
}

#[test]
fn test_requests_list_json_is_array() {
    let temp_dir = TempDir::new().unwrap();

    converge_cmd()
        .env("CONVERGE_DATA_PATH", temp_dir.path())
        .args(["requests", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}
