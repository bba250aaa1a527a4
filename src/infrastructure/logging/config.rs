//! Logging profiles derived from the deployment environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::models::environment::Environment;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Console output format
    pub format: LogFormat,

    /// Directory for log files; `None` logs only to the console
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file output
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

impl LogSettings {
    /// The profile each environment ran with in the original
    /// deployment: verbose pretty console output in development,
    /// structured JSON at reduced verbosity everywhere else.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                log_dir: None,
                rotation: RotationPolicy::Never,
            },
            Environment::Staging => Self {
                level: "info".to_string(),
                format: LogFormat::Json,
                log_dir: None,
                rotation: RotationPolicy::Daily,
            },
            Environment::Production => Self {
                level: "warn".to_string(),
                format: LogFormat::Json,
                log_dir: None,
                rotation: RotationPolicy::Daily,
            },
        }
    }

    /// Adds rotating file output under `dir`.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}
