//! Configuration errors for the haishop settings loader.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single violation found while reading the environment.
///
/// The loader never stops at the first one; every violation in the
/// snapshot ends up in a [`ConfigReport`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigError {
    /// A variable with no usable default was absent from the
    /// environment.
    #[error("missing required configuration: {key}")]
    MissingRequiredConfig {
        /// The environment variable name.
        key: &'static str,
    },

    /// A variable was present but its value failed coercion or
    /// validation. `raw` preserves the offending input, except for
    /// secret-bearing keys where it is redacted before reporting.
    #[error("invalid value for {key}: {raw:?} ({reason})")]
    InvalidConfigValue {
        /// The environment variable name.
        key: &'static str,
        /// The value as it appeared in the environment.
        raw: String,
        /// What the loader expected instead.
        reason: String,
    },
}

impl ConfigError {
    /// The environment variable this violation is about.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MissingRequiredConfig { key } | Self::InvalidConfigValue { key, .. } => key,
        }
    }

    #[cfg(test)]
    pub(crate) fn invalid(key: &'static str, raw: &str, reason: &str) -> Self {
        Self::InvalidConfigValue {
            key,
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Every violation found in one pass over an environment snapshot.
///
/// Violations appear in the order their keys were examined, so two
/// loads of the same snapshot produce identical reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigReport {
    /// The individual violations, in examination order.
    pub violations: Vec<ConfigError>,
}

impl ConfigReport {
    /// Wraps an already-collected list of violations.
    pub fn new(violations: Vec<ConfigError>) -> Self {
        Self { violations }
    }

    /// Number of violations in the report.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the report carries no violations at all. A loader never
    /// returns an empty report as an error.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether any violation concerns the given variable.
    pub fn mentions(&self, key: &str) -> bool {
        self.violations.iter().any(|violation| violation.key() == key)
    }
}

impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.violations.len() == 1 {
            "violation"
        } else {
            "violations"
        };
        write!(f, "configuration invalid: {} {noun}", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigReport {}

/// Result alias for operations that fail with a full report.
pub type LoadResult<T> = Result<T, ConfigReport>;
