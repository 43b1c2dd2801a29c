//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::pages::FallbackPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub pages: PagesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend REST API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Where the signed-in session is kept between CLI runs
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_session_file() -> String {
    dirs::config_dir()
        .map(|p| p.join("payclone").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./payclone_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// Page container behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    /// Show seeded demo data when a primary fetch fails
    #[serde(default)]
    pub placeholder_on_error: bool,

    #[serde(default = "default_placeholder_seed")]
    pub placeholder_seed: u64,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_activity_days")]
    pub activity_days: usize,
}

fn default_placeholder_seed() -> u64 {
    42
}

fn default_page_size() -> usize {
    10
}

fn default_activity_days() -> usize {
    7
}

/// Longest activity window a config may ask for
pub const MAX_ACTIVITY_DAYS: usize = 366;

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            placeholder_on_error: false,
            placeholder_seed: default_placeholder_seed(),
            page_size: default_page_size(),
            activity_days: default_activity_days(),
        }
    }
}

impl PagesConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_ACTIVITY_DAYS).contains(&self.activity_days) {
            return Err(format!(
                "pages.activity_days must be between 1 and {}, got {}",
                MAX_ACTIVITY_DAYS, self.activity_days
            ));
        }
        if self.page_size == 0 {
            return Err("pages.page_size must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        if self.placeholder_on_error {
            FallbackPolicy::Placeholder {
                seed: self.placeholder_seed,
            }
        } else {
            FallbackPolicy::Error
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.pages.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("payclone").join("config.toml")),
            Some(PathBuf::from("./payclone.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("PAYCLONE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("PAYCLONE_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        // Session overrides
        if let Some(file) = var("PAYCLONE_SESSION_FILE") {
            self.session.file = file;
        }

        // Page overrides
        if let Some(flag) = var("PAYCLONE_PLACEHOLDERS") {
            self.pages.placeholder_on_error = matches!(flag.trim(), "1" | "true" | "yes");
        }

        // Logging overrides
        if let Some(level) = var("PAYCLONE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PAYCLONE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PayClone Configuration
#
# Environment variables override these settings:
# - PAYCLONE_API_URL
# - PAYCLONE_API_TIMEOUT
# - PAYCLONE_SESSION_FILE
# - PAYCLONE_PLACEHOLDERS
# - PAYCLONE_LOG_LEVEL
# - PAYCLONE_LOG_FORMAT

[api]
# Base URL of the payments REST API
base_url = "http://localhost:8080/api"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Where the signed-in session is stored
# file = "~/.config/payclone/session.json"

[pages]
# Show seeded demo data instead of an error when a fetch fails
placeholder_on_error = false

# Seed for demo data
placeholder_seed = 42

# Rows per page in transaction listings
page_size = 10

# Days shown in the activity chart
activity_days = 7

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/payclone/payclone.log"
"#
    .to_string()
}
