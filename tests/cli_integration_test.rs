//! CLI integration tests for the haishop-config binary.
//! Drives the check and show commands end to end and verifies exit
//! codes, human output and JSON output.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ============================================================
// Helper functions
// ============================================================

/// Build an `assert_cmd::Command` for the `haishop-config` binary with
/// an emptied environment and `dir` as its working directory, so
/// neither the caller's variables nor a stray `.env` bleed in.
fn config_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_haishop-config"));
    cmd.current_dir(dir).env_clear();
    cmd
}

/// Run a command with `--json` and return the parsed JSON value from
/// stdout, regardless of exit status.
fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

// ============================================================
// check command tests
// ============================================================

#[test]
fn test_check_reports_ok_for_a_valid_environment() {
    let dir = TempDir::new().unwrap();
    config_cmd(dir.path())
        .env("DJANGO_ENV", "development")
        .env("SECRET_KEY", "cli-dev-secret")
        .arg("check")
        .assert()
        .success()
        .stdout(predicates::str::contains("Configuration OK (development)"));
}

#[test]
fn test_check_exits_nonzero_and_lists_every_violation() {
    let dir = TempDir::new().unwrap();
    config_cmd(dir.path())
        .env("DJANGO_ENV", "production")
        .env("DEBUG", "false")
        .env("SECRET_KEY", "django-insecure-carried-over")
        .env("DB_PORT", "not-a-port")
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stdout(
            predicates::str::contains("Configuration invalid: 3 violations")
                .and(predicates::str::contains("ALLOWED_HOSTS"))
                .and(predicates::str::contains("DB_PORT"))
                .and(predicates::str::contains("SECRET_KEY")),
        )
        .stderr(predicates::str::contains("configuration check failed"));
}

#[test]
fn test_check_json_failure_carries_the_violation_list() {
    let dir = TempDir::new().unwrap();
    let value = run_json(
        config_cmd(dir.path())
            .env("DJANGO_ENV", "production")
            .env("DEBUG", "false")
            .env("SECRET_KEY", "django-insecure-carried-over")
            .args(["--json", "check"]),
    );

    assert_eq!(value["ok"], false);
    let violations = value["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0]["kind"], "missing_required_config");
    assert_eq!(violations[0]["key"], "ALLOWED_HOSTS");
    assert_eq!(violations[1]["key"], "SECRET_KEY");
}

#[test]
fn test_check_reads_an_explicit_env_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("deploy.env"),
        "DJANGO_ENV=production\n\
         DEBUG=false\n\
         SECRET_KEY=file-deploy-secret\n\
         ALLOWED_HOSTS=shop.example.com\n",
    )
    .unwrap();

    config_cmd(dir.path())
        .args(["check", "--env-file", "deploy.env"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Configuration OK (production)"));
}

#[test]
fn test_check_picks_up_the_conventional_env_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "DJANGO_ENV=development\nSECRET_KEY=dotenv-secret\n",
    )
    .unwrap();

    config_cmd(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicates::str::contains("Configuration OK (development)"));
}

#[test]
fn test_check_fails_on_a_missing_explicit_env_file() {
    let dir = TempDir::new().unwrap();
    config_cmd(dir.path())
        .args(["check", "--env-file", "absent.env"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicates::str::contains("absent.env"));
}

// ============================================================
// show command tests
// ============================================================

#[test]
fn test_show_renders_the_table_with_secrets_redacted() {
    let dir = TempDir::new().unwrap();
    let assert = config_cmd(dir.path())
        .env("DJANGO_ENV", "development")
        .env("SECRET_KEY", "cli-table-secret")
        .env("DB_PASSWORD", "cli-table-db-pass")
        .arg("show")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("SETTING"));
    assert!(stdout.contains("VALUE"));
    assert!(stdout.contains("[redacted]"));
    assert!(stdout.contains("zh-hans"));
    assert!(!stdout.contains("cli-table-secret"));
    assert!(!stdout.contains("cli-table-db-pass"));
}

#[test]
fn test_show_json_redacts_every_secret_field() {
    let dir = TempDir::new().unwrap();
    let value = run_json(
        config_cmd(dir.path())
            .env("DJANGO_ENV", "development")
            .env("SECRET_KEY", "cli-json-secret")
            .env("DB_PASSWORD", "cli-json-db-pass")
            .env("REDIS_PASSWORD", "cli-json-cache-pass")
            .args(["--json", "show"]),
    );

    assert_eq!(value["secret_key"], "[redacted]");
    assert_eq!(value["database"]["password"], "[redacted]");
    assert_eq!(value["cache"]["password"], "[redacted]");

    let rendered = value.to_string();
    assert!(!rendered.contains("cli-json-secret"));
    assert!(!rendered.contains("cli-json-db-pass"));
    assert!(!rendered.contains("cli-json-cache-pass"));
}

#[test]
fn test_show_fails_on_an_invalid_environment() {
    let dir = TempDir::new().unwrap();
    config_cmd(dir.path())
        .env("DJANGO_ENV", "production")
        .env("DEBUG", "false")
        .env("SECRET_KEY", "a-real-production-secret")
        .arg("show")
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicates::str::contains("configuration invalid")
                .and(predicates::str::contains("ALLOWED_HOSTS")),
        );
}
