//! Configuration management for the CLI
//!
//! Configuration is resolved from, in increasing precedence:
//! - Default values
//! - A configuration file (TOML, YAML or JSON by extension)
//! - Environment variables
//! - Command-line arguments (applied by the handlers)

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use stationjson_core::http::{RetryPolicy, StationClientConfig, DEFAULT_BASE_URL};
use std::path::{Path, PathBuf};

/// Environment variable overriding the fetch base URL
pub const BASE_URL_ENV: &str = "STATIONJSON_BASE_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web-service fetch settings
    pub fetch: FetchConfig,

    /// Conversion settings
    pub conversion: ConversionConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Path settings
    pub paths: PathConfig,
}

/// FDSN station web-service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Station query endpoint
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum requests sent per fetch, the first one included
    /// (0 or 1 disables retries)
    pub max_retries: u32,

    /// User-Agent header
    pub user_agent: Option<String>,
}

/// Conversion defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Module identifier written to every document
    pub module: Option<String>,

    /// Validate every converted document
    pub validate: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Indentation width of pretty JSON
    pub indent: usize,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

/// Path configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Schema used by `validate` and `convert --validate` instead of the bundled one
    pub schema: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            max_retries: 3,
            user_agent: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::JsonPretty,
            indent: 4,
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

/// Serialization format of a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::of(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
        };

        Ok(config)
    }

    /// Load configuration from a specific file or the default locations,
    /// then apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => match Self::discover() {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "Loading configuration file");
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env();
        Ok(config)
    }

    /// First existing file among the default locations
    pub fn discover() -> Option<PathBuf> {
        Self::default_config_paths().into_iter().find(|p| p.exists())
    }

    /// Default configuration file paths, in lookup order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("stationjson.toml"),
            PathBuf::from(".stationjson.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("stationjson").join("config.toml"));
        }

        paths
    }

    fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                self.fetch.base_url = base_url;
            }
        }
    }

    /// Client settings derived from the `fetch` section
    pub fn client_config(&self) -> StationClientConfig {
        let mut client = StationClientConfig {
            retry_policy: RetryPolicy::new(self.fetch.max_retries),
            timeout_secs: self.fetch.timeout_secs,
            ..StationClientConfig::default()
        };
        if let Some(agent) = &self.fetch.user_agent {
            client.user_agent = agent.clone();
        }
        client
    }

    /// Render the configuration in the format implied by `path`
    pub fn render_for(&self, path: &Path) -> Result<String> {
        match FileFormat::of(path) {
            FileFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            FileFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            FileFormat::Toml => self.to_toml(),
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.render_for(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
