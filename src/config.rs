//! Configuration management
//!
//! Settings are read from `isoaudit.toml` in the working directory, falling
//! back to `~/.config/isoaudit/config.toml`, then to built-in defaults.
//! Missing keys take their default value.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::paths;

/// isoaudit configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where data lives
    #[serde(default)]
    pub storage: StorageConfig,
    /// HTTP server binding
    #[serde(default)]
    pub server: ServerConfig,
    /// API behaviour
    #[serde(default)]
    pub api: ApiConfig,
    /// Report defaults
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the store document
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_DATA_DIR)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Path of the store document
    #[must_use]
    pub fn store_file(&self) -> PathBuf {
        paths::store_file(&self.data_dir)
    }
}

/// Server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    9001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port`
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// API settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Page size when a list request gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound on any requested page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

const fn default_page_size() -> usize {
    20
}

const fn default_max_page_size() -> usize {
    100
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl ApiConfig {
    /// Effective page size for a request
    #[must_use]
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        let max = self.max_page_size.max(1);
        requested.unwrap_or(self.default_page_size).clamp(1, max)
    }
}

/// Report settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Months covered by the trend report
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,
}

const fn default_trend_months() -> u32 {
    12
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            trend_months: default_trend_months(),
        }
    }
}

impl AppConfig {
    /// Parse a config file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Find and load the active config
    ///
    /// Returns the config and the file it came from (`None` for defaults).
    pub fn discover() -> anyhow::Result<(Self, Option<PathBuf>)> {
        for path in [paths::project_config(), paths::global_config()] {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                return Ok((Self::load_from(&path)?, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
