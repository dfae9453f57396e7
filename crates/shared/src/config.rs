//! Configuration management for the API clients.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings. Credentials are never read from
//! the file; each API section only names the environment variable that holds
//! its credential.

use crate::Result;
use anyhow::Context;
use rest_client::{AuthMode, ClientConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,

    /// Bangumi API settings
    pub bangumi: ApiConfig,

    /// Steam Web API settings
    pub steam: ApiConfig,

    /// VNDB Kana API settings
    pub vndb: ApiConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Settings for a single target API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Fixed host and prefix, e.g. `https://api.bgm.tv`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Environment variable holding the credential, if the API needs one
    #[serde(default)]
    pub credential_env: Option<String>,
}

impl ApiConfig {
    fn new(base_url: &str, user_agent: Option<&str>, credential_env: Option<&str>) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_seconds: 30,
            user_agent: user_agent.map(str::to_string),
            credential_env: credential_env.map(str::to_string),
        }
    }

    /// Default Bangumi settings
    pub fn bangumi() -> Self {
        Self::new(
            "https://api.bgm.tv",
            Some("Bangumi-API-Example/1.0"),
            Some("BGM_TOKEN"),
        )
    }

    /// Default Steam Web API settings
    pub fn steam() -> Self {
        Self::new("https://api.steampowered.com", None, Some("STEAM_API_KEY"))
    }

    /// Default VNDB settings (no credential)
    pub fn vndb() -> Self {
        Self::new("https://api.vndb.org/kana", None, None)
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Client settings for this API with the given auth mode and credential
    pub fn client_config(&self, auth: AuthMode, credential: Option<String>) -> ClientConfig {
        let config = ClientConfig::new(&self.base_url)
            .with_timeout(self.timeout())
            .with_auth(auth)
            .with_credential(credential);

        match &self.user_agent {
            Some(user_agent) => config.with_header("User-Agent", user_agent),
            None => config,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            bangumi: ApiConfig::bangumi(),
            steam: ApiConfig::steam(),
            vndb: ApiConfig::vndb(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was missing
    Defaults,
}

impl ConfigSource {
    /// Log how the configuration was obtained. Call once logging is set up.
    pub fn report(self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self {
            ConfigSource::File => tracing::debug!(
                path = %path.display(),
                "Configuration loaded successfully"
            ),
            ConfigSource::Defaults => tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            ),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and log the outcome
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (config, source) = Self::load(path)?;
        source.report(path);
        Ok(config)
    }

    /// Load configuration without logging, for use before the subscriber
    /// exists. Pass the returned source to [`ConfigSource::report`] later.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, ConfigSource)> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok((config, ConfigSource::File))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }
}
