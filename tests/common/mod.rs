//! Common test utilities for integration tests
//!
//! Shared fixtures used across the integration test files.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Create a temporary directory that is cleaned up on drop.
#[allow(dead_code)]
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write `contents` to a `.env` file inside `dir` and return its path.
#[allow(dead_code)]
pub fn write_env_file(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join(".env");
    fs::write(&path, contents).expect("Failed to write env file");
    path
}

/// The minimal variable pairs a valid development deployment needs.
#[allow(dead_code)]
pub fn dev_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("DJANGO_ENV", "development"),
        ("SECRET_KEY", "integration-test-secret"),
    ]
}
