//! Configuration management for pulsefeed.
//!
//! Configuration is read from `~/.config/pulsefeed/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::normalizer::RecordPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public health-headline feed used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://saurav.tech/NewsAPI/top-headlines/category/health/in.json";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub decoder: DecoderConfig,
}

/// Where and how the headline feed is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,

    /// Upper bound for one fetch, connect through body (default: 15)
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Honor HTTP(S)_PROXY environment variables (default: true)
    pub use_system_proxy: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("pulsefeed/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub on_bad_record: RecordPolicy,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        if config.feed.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "feed.timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(config)
    }

    /// Get the default config file path: `~/.config/pulsefeed/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pulsefeed").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        format!(
            r##"# pulsefeed configuration

[feed]
# JSON endpoint returning {{"articles": [...]}}
endpoint = "{endpoint}"

# Give up on a fetch after this many seconds
timeout_secs = {timeout}

user_agent = "pulsefeed/{version}"

# Set to false to ignore HTTP_PROXY / HTTPS_PROXY
use_system_proxy = true

[decoder]
# What to do with a record whose publishedAt cannot be parsed:
# "strict" fails the whole refresh, "skip" drops just that record
on_bad_record = "strict"
"##,
            endpoint = DEFAULT_ENDPOINT,
            timeout = DEFAULT_TIMEOUT_SECS,
            version = env!("CARGO_PKG_VERSION"),
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
