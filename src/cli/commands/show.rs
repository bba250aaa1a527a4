//! Implementation of the `haishop-config show` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Settings;
use crate::infrastructure::config::SettingsLoader;

use super::check;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Env file to layer under the process environment (defaults to
    /// ./.env when present)
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}

/// Resolved settings with every secret already redacted.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ShowOutput {
    pub settings: Settings,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let settings = &self.settings;
        let mut table = settings_table();

        let rows: Vec<(&str, String)> = vec![
            ("environment", settings.environment.to_string()),
            ("debug", settings.debug.to_string()),
            ("secret_key", settings.secret_key.clone()),
            ("allowed_hosts", join_or_dash(&settings.allowed_hosts)),
            ("db.engine", settings.database.engine.to_string()),
            ("db.name", settings.database.name.clone()),
            ("db.user", settings.database.user.clone()),
            ("db.password", settings.database.password.clone()),
            ("db.endpoint", settings.database.endpoint()),
            (
                "db.conn_max_age",
                format_secs(settings.database.conn_max_age_secs),
            ),
            ("cache.url", settings.cache.url.to_string()),
            (
                "cache.password",
                settings.cache.password.clone().unwrap_or_default(),
            ),
            (
                "cache.max_connections",
                settings.cache.max_connections.to_string(),
            ),
            ("cache.key_prefix", settings.cache.key_prefix.clone()),
            (
                "cache.socket_timeout",
                opt_secs(settings.cache.socket_timeout_secs),
            ),
            (
                "cache.default_ttl",
                opt_secs(settings.cache.default_ttl_secs),
            ),
            ("cache.compression", settings.cache.compression.to_string()),
            ("locale.language_code", settings.locale.language_code.clone()),
            ("locale.time_zone", settings.locale.time_zone.name().to_string()),
            (
                "products.image_path",
                settings.products.image_path.display().to_string(),
            ),
            (
                "products.cache_timeout",
                format_secs(settings.products.cache_timeout_secs),
            ),
            (
                "products.related_limit",
                settings.products.related_limit.to_string(),
            ),
            (
                "products.show_drafts",
                settings.products.show_drafts.to_string(),
            ),
        ];
        for (name, value) in rows {
            table.add_row([name.to_string(), value]);
        }
        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Loads the environment and prints the resolved settings. Secrets are
/// replaced with a redaction marker in both output modes.
pub fn execute(args: ShowArgs, json_mode: bool) -> Result<()> {
    let source = check::snapshot(args.env_file.as_deref())?;
    let settings = SettingsLoader::load_from(&source)?;

    let output_data = ShowOutput {
        settings: settings.redacted(),
    };
    output(&output_data, json_mode);
    Ok(())
}

/// Borderless two-column table, matching the list aesthetic of the
/// rest of the tooling.
fn settings_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["setting", "value"]
                .iter()
                .map(|header| Cell::new(header.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn format_secs(secs: u64) -> String {
    format!("{secs}s")
}

fn opt_secs(secs: Option<u64>) -> String {
    secs.map_or_else(|| "-".to_string(), format_secs)
}
