//! Environment snapshots the settings loader reads from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Conventional env file looked up next to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Raised when an explicitly requested env file cannot be read or
/// parsed.
#[derive(Debug, Error)]
#[error("failed to load env file {}: {source}", path.display())]
pub struct EnvFileError {
    /// The file that was being read.
    pub path: PathBuf,
    #[source]
    source: dotenvy::Error,
}

/// An immutable snapshot of environment variables.
///
/// The loader only ever reads snapshots, never the live process
/// environment. That keeps a load deterministic for its inputs and
/// keeps tests free of process-global mutation.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshots the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Builds a snapshot from explicit pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Merges an env file underneath the snapshot. Variables already in
    /// the snapshot keep their value, so the process environment wins
    /// over the file. A file that fails to parse merges nothing.
    pub fn with_env_file(mut self, path: &Path) -> Result<Self, EnvFileError> {
        self.merge_env_file(path)?;
        Ok(self)
    }

    /// Merges the conventional `./.env` when it exists. A missing file
    /// is fine; an unreadable one is logged and skipped rather than
    /// failing startup.
    pub fn with_default_env_file(mut self) -> Self {
        let path = Path::new(DEFAULT_ENV_FILE);
        if !path.exists() {
            debug!(file = DEFAULT_ENV_FILE, "no env file present");
            return self;
        }
        if let Err(error) = self.merge_env_file(path) {
            warn!(%error, "ignoring unreadable env file");
        }
        self
    }

    /// The raw value of `key`, if the snapshot has it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Number of variables in the snapshot.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot holds no variables at all.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    // The whole file is parsed before the snapshot is touched; a file
    // that fails part-way through merges nothing.
    fn merge_env_file(&mut self, path: &Path) -> Result<(), EnvFileError> {
        let entries = dotenvy::from_path_iter(path).map_err(|source| EnvFileError {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: Vec<(String, String)> =
            entries
                .collect::<Result<_, _>>()
                .map_err(|source| EnvFileError {
                    path: path.to_path_buf(),
                    source,
                })?;
        let merged = parsed.len();
        for (key, value) in parsed {
            self.vars.entry(key).or_insert(value);
        }
        debug!(file = %path.display(), merged, "merged env file");
        Ok(())
    }
}
