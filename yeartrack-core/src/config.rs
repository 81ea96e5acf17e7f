//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/yeartrack/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/yeartrack/` (~/.config/yeartrack/)
//! - State/Logs: `$XDG_STATE_HOME/yeartrack/` (~/.local/state/yeartrack/)

use crate::error::{Error, Result};
use crate::types::Credential;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Tracker connection settings
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persisted connection settings for the issue tracker.
///
/// These are the "remembered" login settings; the core never stores a
/// credential on its own.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TrackerConfig {
    /// Base URL of the tracker (e.g., `https://tracker.example.com`)
    pub endpoint: Option<String>,

    /// Permanent API token
    pub token: Option<String>,

    /// Project short names to collect knowledge-base articles from
    #[serde(default)]
    pub article_projects: Vec<String>,
}

impl TrackerConfig {
    /// Build a credential from the stored settings.
    pub fn credential(&self) -> Result<Credential> {
        let endpoint = self
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| Error::Validation("tracker endpoint is required".to_string()))?;
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Validation("tracker token is required".to_string()))?;

        Ok(Credential::new(endpoint, token))
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also print warnings and errors to stderr
    #[serde(default)]
    pub warnings_to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            warnings_to_stderr: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Persist configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Persist configuration to a specific path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/yeartrack/config.toml` (~/.config/yeartrack/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("yeartrack").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/yeartrack/` (~/.local/state/yeartrack/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("yeartrack")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/yeartrack/yeartrack.log` (~/.local/state/yeartrack/yeartrack.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join(crate::logging::LOG_FILE_NAME)
    }
}
