use std::io;

use anyhow::Result;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::config::{LogFormat, LogSettings, RotationPolicy};

/// Base name of rotated log files.
const LOG_FILE_NAME: &str = "haishop.log";

/// Process-wide logging built from a [`LogSettings`] profile.
///
/// Console output goes to stderr so piped stdout stays parseable.
/// File output, when a log directory is configured, is always JSON.
pub struct Logger {
    _guard: Option<WorkerGuard>,
}

impl Logger {
    /// Initialize logging for this process.
    ///
    /// The profile's level is only a default; `RUST_LOG` still
    /// overrides it. The returned guard must be held for the life of
    /// the process or buffered file output is lost.
    ///
    /// # Errors
    /// Returns an error if the level string is not a known level or a
    /// subscriber is already installed.
    #[allow(clippy::too_many_lines)]
    pub fn init(settings: &LogSettings) -> Result<Self> {
        let default_level = parse_log_level(&settings.level)?;
        let env_filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        let guard = if let Some(ref log_dir) = settings.log_dir {
            let file_appender = match settings.rotation {
                RotationPolicy::Daily => rolling::daily(log_dir, LOG_FILE_NAME),
                RotationPolicy::Hourly => rolling::hourly(log_dir, LOG_FILE_NAME),
                RotationPolicy::Never => rolling::never(log_dir, LOG_FILE_NAME),
            };
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter.clone());

            match settings.format {
                LogFormat::Json => {
                    let console_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_filter(env_filter);
                    tracing_subscriber::registry()
                        .with(file_layer)
                        .with(console_layer)
                        .try_init()?;
                }
                LogFormat::Pretty => {
                    let console_layer = tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_filter(env_filter);
                    tracing_subscriber::registry()
                        .with(file_layer)
                        .with(console_layer)
                        .try_init()?;
                }
            }

            Some(guard)
        } else {
            match settings.format {
                LogFormat::Json => {
                    let console_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_filter(env_filter);
                    tracing_subscriber::registry().with(console_layer).try_init()?;
                }
                LogFormat::Pretty => {
                    let console_layer = tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_filter(env_filter);
                    tracing_subscriber::registry().with(console_layer).try_init()?;
                }
            }

            None
        };

        tracing::debug!(
            level = %settings.level,
            format = ?settings.format,
            file_output = settings.log_dir.is_some(),
            "logging initialized"
        );

        Ok(Self { _guard: guard })
    }
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}
