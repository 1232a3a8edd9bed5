//! Configuration management for shotcheck.
//!
//! Configuration is loaded from a platform config directory with sensible
//! defaults, so the tool works with no config file at all. The API key is
//! never stored in the file directly; the default value is an `${ENV_VAR}`
//! reference resolved at startup.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for shotcheck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Screenshot source settings
    pub source: SourceConfig,

    /// Report output settings
    pub report: ReportConfig,

    /// Remote review call settings
    pub review: ReviewConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Screenshot source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory scanned for screenshots
    pub screenshot_dir: PathBuf,

    /// Extensions accepted as screenshots (matched case-insensitively)
    pub supported_formats: Vec<String>,

    /// Delay between polls in watch mode, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: PathBuf::from("debug_screenshots"),
            supported_formats: vec![
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "gif".to_string(),
                "webp".to_string(),
            ],
            poll_interval_ms: 2000,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory where Markdown reports are written
    pub report_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("debug_reports"),
        }
    }
}

/// Remote review call settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// API key, or an `${ENV_VAR}` reference resolved at startup
    pub api_key: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Maximum tokens the model may generate per review
    pub max_tokens: u32,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            api_key: "${ANTHROPIC_API_KEY}".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1024,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    pub level: String,

    /// Log format ("pretty" or "json")
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.shotcheck.shotcheck/config.toml
    /// - Linux: ~/.config/shotcheck/config.toml
    ///
    /// Falls back to ~/.shotcheck/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "shotcheck", "shotcheck")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".shotcheck").join("config.toml")
            })
    }

    /// Check that configured values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.review.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "review.model must not be empty".to_string(),
            ));
        }
        if self.review.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "review.max_tokens must be greater than zero".to_string(),
            ));
        }
        if self.source.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "source.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.source.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "source.supported_formats must list at least one extension".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the resolved screenshot directory path (with ~ expansion).
    pub fn screenshot_dir(&self) -> PathBuf {
        expand_tilde(&self.source.screenshot_dir)
    }

    /// Get the resolved report directory path (with ~ expansion).
    pub fn report_dir(&self) -> PathBuf {
        expand_tilde(&self.report.report_dir)
    }

    /// Resolve the configured API key, failing if it is unset.
    ///
    /// Both modes call this before touching the filesystem or the network,
    /// so a missing credential does no work at all.
    pub fn resolved_api_key(&self) -> Result<String, ConfigError> {
        resolve_env_var(&self.review.api_key).ok_or(ConfigError::MissingApiKey)
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
