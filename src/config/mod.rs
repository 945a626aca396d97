//! Configuration management for tidings.
//!
//! Configuration is read from `~/.config/tidings/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. Missing fields fall back to defaults.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the digest backend.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8787/api".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Interval between digest checks: "30s", "5m", "1h", "1d", or raw
    /// seconds.
    pub interval: String,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: "30s".to_string(),
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Result<Duration, ConfigError> {
        parse_interval(&self.interval)
            .map(Duration::from_secs)
            .map_err(ConfigError::InvalidInterval)
    }
}

/// Parse an interval string like "30s", "5m", "1h", "1d"
pub fn parse_interval(s: &str) -> Result<u64, String> {
    let s = s.trim().to_lowercase();

    if let Some(hours) = s.strip_suffix('h') {
        hours
            .parse::<u64>()
            .map(|h| h * 3600)
            .map_err(|_| format!("Invalid hours: {}", hours))
    } else if let Some(minutes) = s.strip_suffix('m') {
        minutes
            .parse::<u64>()
            .map(|m| m * 60)
            .map_err(|_| format!("Invalid minutes: {}", minutes))
    } else if let Some(days) = s.strip_suffix('d') {
        days.parse::<u64>()
            .map(|d| d * 86400)
            .map_err(|_| format!("Invalid days: {}", days))
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>()
            .map_err(|_| format!("Invalid seconds: {}", secs))
    } else {
        // Try parsing as raw seconds
        s.parse::<u64>()
            .map_err(|_| format!("Invalid interval: {}. Use format like '30s', '5m', '1h'", s))
    }
}

/// Format an interval for display
pub fn format_interval(secs: u64) -> String {
    if secs >= 86400 && secs % 86400 == 0 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with
    /// comments and returns the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/tidings/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tidings").join("config.toml"))
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

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Tidings Configuration

[api]
# Base URL of the digest backend.
base_url = "http://localhost:8787/api"

[poll]
# Interval between digest checks.
# Accepts "30s", "5m", "1h", "1d", or raw seconds.
interval = "30s"
"##
        .to_string()
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

    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Invalid poll interval: {0}")]
    InvalidInterval(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.base_url, "http://localhost:8787/api");
        assert_eq!(config.poll.interval, "30s");
        assert_eq!(config.poll.interval().unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_config() {
        let content = r#"
[poll]
interval = "5m"
"#;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.poll.interval().unwrap(), Duration::from_secs(300));
        // Default value
        assert_eq!(config.api.base_url, "http://localhost:8787/api");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.poll.interval, "30s");
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("1h").unwrap(), 3600);
        assert_eq!(parse_interval("30m").unwrap(), 1800);
        assert_eq!(parse_interval("1d").unwrap(), 86400);
        assert_eq!(parse_interval("60s").unwrap(), 60);
        assert_eq!(parse_interval("3600").unwrap(), 3600);
        assert!(parse_interval("invalid").is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(3600), "1h");
        assert_eq!(format_interval(1800), "30m");
        assert_eq!(format_interval(86400), "1d");
        assert_eq!(format_interval(90), "90s");
        assert_eq!(format_interval(30), "30s");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
        };
        assert!(config.base_url().is_err());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).expect("first load should create defaults");
        assert_eq!(config.poll.interval, "30s");
        assert!(path.exists());

        // Second load reads the file that was just written.
        let reloaded = Config::load_from(&path).expect("second load should parse");
        assert_eq!(reloaded.api.base_url, config.api.base_url);
    }

    #[test]
    fn test_load_from_rejects_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[poll\ninterval=").expect("write");

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
