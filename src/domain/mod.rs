//! Domain layer for the haishop configuration service.
//!
//! This module contains the validated settings model and the error
//! vocabulary the loader reports in.

pub mod errors;
pub mod models;

pub use errors::{ConfigError, ConfigReport, LoadResult};
pub use models::{Environment, Settings};
