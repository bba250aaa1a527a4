//! Implementation of the `haishop-config check` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::errors::ConfigError;
use crate::infrastructure::config::{EnvSource, SettingsLoader};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Env file to layer under the process environment (defaults to
    /// ./.env when present)
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub ok: bool,
    pub environment: Option<String>,
    pub violations: Vec<ConfigError>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        if self.ok {
            return format!(
                "Configuration OK ({})",
                self.environment.as_deref().unwrap_or("unknown")
            );
        }
        let noun = if self.violations.len() == 1 {
            "violation"
        } else {
            "violations"
        };
        let mut lines = vec![format!(
            "Configuration invalid: {} {noun}",
            self.violations.len()
        )];
        for violation in &self.violations {
            lines.push(format!("  - {violation}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Loads the environment, prints every violation found, and exits
/// nonzero when the configuration would not start the service.
pub fn execute(args: CheckArgs, json_mode: bool) -> Result<()> {
    let source = snapshot(args.env_file.as_deref())?;

    match SettingsLoader::load_from(&source) {
        Ok(settings) => {
            let output_data = CheckOutput {
                ok: true,
                environment: Some(settings.environment.to_string()),
                violations: vec![],
            };
            output(&output_data, json_mode);
            Ok(())
        }
        Err(report) => {
            let output_data = CheckOutput {
                ok: false,
                environment: None,
                violations: report.violations,
            };
            output(&output_data, json_mode);
            anyhow::bail!("configuration check failed")
        }
    }
}

pub(super) fn snapshot(env_file: Option<&Path>) -> Result<EnvSource> {
    let source = EnvSource::from_process();
    Ok(match env_file {
        Some(path) => source.with_env_file(path)?,
        None => source.with_default_env_file(),
    })
}
