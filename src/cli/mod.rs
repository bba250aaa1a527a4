//! CLI surface: argument parsing, commands, and output formatting.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "haishop-config")]
#[command(about = "Environment-driven settings for the haishop service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the environment and report every violation at once
    Check(commands::check::CheckArgs),

    /// Print the resolved settings with secrets redacted
    Show(commands::show::ShowArgs),
}

/// Print an error and exit nonzero.
pub fn handle_error(error: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        eprintln!("{}", serde_json::json!({ "error": format!("{error:#}") }));
    } else {
        eprintln!("Error: {error:#}");
    }
    std::process::exit(1);
}
