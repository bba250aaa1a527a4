//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Per-environment profiles (pretty console in development, JSON
//!   elsewhere)
//! - Optional rotating file output
//! - `RUST_LOG` overrides

pub mod config;
pub mod logger;

pub use config::{LogFormat, LogSettings, RotationPolicy};
pub use logger::Logger;
