//! Configuration loading infrastructure
//!
//! Environment-driven settings:
//! - Process environment and `.env` file snapshots
//! - Token-set boolean and strict integer coercion
//! - Single-pass validation that reports every violation at once

pub mod coerce;
pub mod loader;
pub mod source;

pub use loader::SettingsLoader;
pub use source::{EnvFileError, EnvSource, DEFAULT_ENV_FILE};
