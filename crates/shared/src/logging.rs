//! Logging infrastructure for the API clients.
//!
//! Console output goes to stderr so that stdout carries only the results a
//! command prints. File output is optional and rotates daily.

use crate::config::LoggingConfig;
use crate::Result;
use anyhow::Context;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory path
    pub log_dir: String,
    /// Component name (used for log file naming and the default filter)
    pub component: String,
    /// Default log level
    pub default_level: Level,
    /// Enable console output
    pub console: bool,
    /// Enable file output
    pub file: bool,
    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            component: "media-api".to_string(),
            default_level: Level::INFO,
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// Build a logging configuration from the `[logging]` config section.
    ///
    /// `verbose` forces DEBUG regardless of the configured level. An
    /// unrecognised level string falls back to INFO.
    pub fn from_settings(settings: &LoggingConfig, component: &str, verbose: bool) -> Self {
        let default_level = if verbose {
            Level::DEBUG
        } else {
            settings.default_level.parse().unwrap_or(Level::INFO)
        };

        Self {
            log_dir: settings.log_dir.clone(),
            component: component.to_string(),
            default_level,
            console: settings.console,
            file: settings.file,
            json_format: settings.json_format,
        }
    }

    fn filter_directives(&self) -> String {
        // Targets use the crate name, which swaps '-' for '_'
        format!(
            "{}={},shared={},rest_client={},hyper=warn,reqwest=warn,h2=warn",
            self.component.replace('-', "_"),
            self.default_level,
            self.default_level,
            self.default_level
        )
    }
}

/// Initialize logging with the given configuration
///
/// Sets up tracing with:
/// - Console output on stderr
/// - Optional daily file rotation
/// - Optional JSON formatting for the file layer
/// - `RUST_LOG` override of the default filter
pub fn init(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    let mut layers = Vec::new();

    if config.console {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr)
            .boxed();
        layers.push(console_layer);
    }

    if config.file {
        let log_dir = Path::new(&config.log_dir);
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", config.log_dir))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, &config.component);

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(file_appender)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(file_appender)
                .boxed()
        };

        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        component = %config.component,
        file = config.file,
        "Logging initialized"
    );

    Ok(())
}
