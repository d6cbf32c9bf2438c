use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

// =============================================================================
// Defaults
// =============================================================================

/// Default number of days an update may stay unapplied
pub const DEFAULT_DELAY_DAYS: i64 = 5;

/// Manifest checked when no files are given on the command line
pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.txt";

/// Default package index
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Delay between starting each fetch request to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// piprot configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PiprotConfig {
    /// Days an update may stay unapplied before the pin counts as rotten
    pub delay_days: i64,
    /// Base URL of the package index
    pub index_url: String,
    /// Timeout for a single registry request in milliseconds
    pub fetch_timeout_ms: u64,
}

impl Default for PiprotConfig {
    fn default() -> Self {
        Self {
            delay_days: DEFAULT_DELAY_DAYS,
            index_url: DEFAULT_INDEX_URL.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl PiprotConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicitly given file, or the default config file if one
    /// exists, or fall back to defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = config_path();
        if default_path.is_file() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the path to the config directory for piprot.
/// Uses $XDG_CONFIG_HOME/piprot if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/piprot,
/// or ./piprot if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("piprot")
}
