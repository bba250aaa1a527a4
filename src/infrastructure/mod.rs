//! Infrastructure layer module
//!
//! This module contains the adapters between the domain model and the
//! outside world:
//! - Configuration loading (environment variables, `.env` files)
//! - Logging infrastructure

pub mod config;
pub mod logging;
