//! haishop-config - Environment-driven settings for the haishop service
//!
//! Loads, coerces, and validates every configuration variable the
//! haishop e-commerce service reads at startup. A load walks the whole
//! environment in one pass and reports every violation together, so a
//! misconfigured deployment fails with a complete picture instead of
//! one error at a time.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): The validated settings model and error vocabulary
//! - **Infrastructure Layer** (`infrastructure`): Environment snapshots, coercion, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use haishop_config::{EnvSource, SettingsLoader};
//!
//! fn main() -> anyhow::Result<()> {
//!     let source = EnvSource::from_process().with_default_env_file();
//!     let settings = SettingsLoader::load_from(&source)?;
//!     println!("running as {}", settings.environment);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::errors::{ConfigError, ConfigReport, LoadResult};
pub use domain::models::{
    CacheSettings, DatabaseEngine, DatabaseSettings, Environment, LocaleSettings, ProductSettings,
    Settings, UnknownEnvironment,
};
pub use infrastructure::config::{EnvFileError, EnvSource, SettingsLoader};
pub use infrastructure::logging::{LogFormat, LogSettings, Logger, RotationPolicy};
