//! Configuration System
//!
//! Handles loading configuration from TOML files and environment variables.
//! Environment variables always win over file values.

use crate::store::BackendKind;
use crate::tracker::{TrackerSettings, WriteFailurePolicy};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Token store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// A leading `~` is expanded to the home directory
    #[serde(default = "default_data_dir", deserialize_with = "deserialize_data_dir")]
    pub data_dir: PathBuf,

    /// Backends to try, in order
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendKind>,

    #[serde(default = "default_save_retries")]
    pub save_retries: u32,

    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,

    #[serde(default)]
    pub on_write_failure: WriteFailurePolicy,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("mindshare"))
        .unwrap_or_else(|| PathBuf::from("./mindshare_data"))
}

fn deserialize_data_dir<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
    PathBuf::deserialize(deserializer).map(expand_home)
}

/// Expand a leading `~` component to the home directory
fn expand_home(path: PathBuf) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return path;
    };
    if path == Path::new("~") {
        return home;
    }
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path,
    }
}

fn default_backends() -> Vec<BackendKind> {
    vec![BackendKind::File, BackendKind::Memory]
}

fn default_save_retries() -> u32 {
    2
}

fn default_retry_backoff() -> u64 {
    50
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backends: default_backends(),
            save_retries: default_save_retries(),
            retry_backoff_ms: default_retry_backoff(),
            on_write_failure: WriteFailurePolicy::default(),
        }
    }
}

impl StorageConfig {
    /// Controller settings derived from this section
    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            save_retries: self.save_retries,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            on_write_failure: self.on_write_failure,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
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

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
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
            dirs::config_dir().map(|p| p.join("mindshare").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// An explicit path must load; otherwise fall back to [`Config::load_default`]
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = var("MINDSHARE_DATA_DIR") {
            self.storage.data_dir = expand_home(PathBuf::from(data_dir));
        }
        if let Some(backends) = var("MINDSHARE_BACKENDS") {
            let parsed: Vec<BackendKind> = backends
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .filter_map(|s| match s.parse() {
                    Ok(kind) => Some(kind),
                    Err(e) => {
                        tracing::warn!("Ignoring MINDSHARE_BACKENDS entry: {}", e);
                        None
                    }
                })
                .collect();
            self.storage.backends = parsed;
        }

        // Logging overrides
        if let Some(level) = var("MINDSHARE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MINDSHARE_LOG_FORMAT") {
            match format.parse() {
                Ok(format) => self.logging.format = format,
                Err(e) => tracing::warn!("Ignoring MINDSHARE_LOG_FORMAT: {}", e),
            }
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
    r#"# Mindshare Configuration
#
# Environment variables override these settings:
# - MINDSHARE_DATA_DIR
# - MINDSHARE_BACKENDS (comma-separated, e.g. "file,memory")
# - MINDSHARE_LOG_LEVEL
# - MINDSHARE_LOG_FORMAT

[storage]
# Directory for the tracked-token store
data_dir = "~/.local/share/mindshare"

# Backends to try in order: "file" (durable) and "memory" (lost on exit)
backends = ["file", "memory"]

# Extra save attempts after a failed write
save_retries = 2

# Delay between save attempts (ms)
retry_backoff_ms = 50

# When a save still fails: "rollback" drops the change, "keep" keeps it
# in memory until a later save or flush succeeds
on_write_failure = "rollback"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json
format = "pretty"
"#
    .to_string()
}
