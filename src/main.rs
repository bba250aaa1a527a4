//! haishop-config CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use haishop_config::cli::{Cli, Commands};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => haishop_config::cli::commands::check::execute(args, cli.json),
        Commands::Show(args) => haishop_config::cli::commands::show::execute(args, cli.json),
    };

    if let Err(err) = result {
        haishop_config::cli::handle_error(err, cli.json);
    }
}
