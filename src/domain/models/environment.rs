//! Deployment environment and the profile defaults attached to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named deployment mode, selected by the `DJANGO_ENV` variable.
///
/// The environment drives profile defaults: debug mode, draft-product
/// visibility, cache tuning, and log verbosity all key off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: debug on by default, draft products visible.
    Development,
    /// Pre-production: production-like defaults without the
    /// production-only secret checks.
    Staging,
    /// Production: debug off, strict secret validation, conservative
    /// cache and logging profiles.
    Production,
}

/// Raised when `DJANGO_ENV` carries a token outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized environment {0:?} (expected one of: development, staging, production)")]
pub struct UnknownEnvironment(pub String);

impl Environment {
    /// All recognized environments, in promotion order.
    pub const ALL: [Self; 3] = [Self::Development, Self::Staging, Self::Production];

    /// The canonical lowercase token for this environment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Whether this is the production environment.
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Whether this is the development environment.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Default for the `DEBUG` flag when the variable is absent.
    ///
    /// Debug defaults to on only during development; staging and
    /// production must opt in explicitly.
    pub fn debug_default(self) -> bool {
        self.is_development()
    }

    /// Default visibility of draft products in catalog responses.
    pub fn show_drafts_default(self) -> bool {
        self.is_development()
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    /// Parses the `DJANGO_ENV` token, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_canonical_tokens() {
        assert_eq!("development".parse(), Ok(Environment::Development));
        assert_eq!("staging".parse(), Ok(Environment::Staging));
        assert_eq!("production".parse(), Ok(Environment::Production));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!("Production".parse(), Ok(Environment::Production));
        assert_eq!("  STAGING ".parse(), Ok(Environment::Staging));
    }

    #[test]
    fn test_rejects_unknown_tokens() {
        let err = "qa".parse::<Environment>().unwrap_err();
        assert_eq!(err, UnknownEnvironment("qa".to_string()));
        assert!(err.to_string().contains("development, staging, production"));
    }

    #[test]
    fn test_debug_defaults_follow_environment() {
        assert!(Environment::Development.debug_default());
        assert!(!Environment::Staging.debug_default());
        assert!(!Environment::Production.debug_default());
    }

    #[test]
    fn test_drafts_are_hidden_outside_development() {
        assert!(Environment::Development.show_drafts_default());
        assert!(!Environment::Staging.show_drafts_default());
        assert!(!Environment::Production.show_drafts_default());
    }

    #[test]
    fn test_display_round_trips() {
        for env in Environment::ALL {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }
}
