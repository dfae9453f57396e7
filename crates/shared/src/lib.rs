//! Shared library for the media API command-line clients.
//!
//! This crate provides common functionality used across all binary crates:
//! - Configuration management (per-API base URL, timeout, credential source)
//! - Logging infrastructure

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{ApiConfig, Config, ConfigSource};
pub use logging::LogConfig;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
