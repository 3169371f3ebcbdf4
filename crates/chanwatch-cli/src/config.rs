//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable holding the YouTube Data API key
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Global configuration for chanwatch
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub youtube: YouTubeConfig,
    pub retry: RetryConfig,
    pub output: OutputConfig,
    pub window: WindowConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    pub api_url: String,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub api_key: Option<String>,
    pub page_size: u32,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_url: chanwatch_youtube::api::DEFAULT_API_URL.to_string(),
            api_key: std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()),
            page_size: chanwatch_youtube::api::MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub delay_secs: u64,
    /// Cap on any single retry wait
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_secs: 5,
            max_delay_secs: chanwatch_core::MAX_DELAY.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("newchannels.csv"),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub days_ago: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { days_ago: 1 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Deserialize a string that may be a `${VAR}` environment reference
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand `${VAR}`; literals pass through, empty values count as unset
fn expand_env_var(s: &str) -> Option<String> {
    let value = match s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        Some(var_name) => std::env::var(var_name).ok()?,
        None => s.to_string(),
    };
    (!value.is_empty()).then_some(value)
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./chanwatch.toml (current directory)
    /// 2. ~/.config/chanwatch/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("chanwatch.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "chanwatch") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// API key, or a fatal configuration error naming the variable to set
    pub fn require_api_key(&self) -> Result<&str> {
        self.youtube
            .api_key
            .as_deref()
            .with_context(|| format!("Missing {API_KEY_VAR} environment variable!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.output.path, PathBuf::from("newchannels.csv"));
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.delay_secs, 5);
        assert_eq!(config.retry.max_delay_secs, 300);
        assert_eq!(config.window.days_ago, 1);
        assert_eq!(config.youtube.page_size, 50);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn expand_env_var_simple() {
        std::env::set_var("CHANWATCH_TEST_VAR", "test_value");
        assert_eq!(
            expand_env_var("${CHANWATCH_TEST_VAR}"),
            Some("test_value".to_string())
        );
        std::env::remove_var("CHANWATCH_TEST_VAR");
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing_or_empty() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_12345}"), None);
        assert_eq!(expand_env_var(""), None);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[youtube]
api_key = "abc123"
page_size = 25

[retry]
max_retries = 5
delay_secs = 2

[output]
path = "/tmp/channels.csv"

[window]
days_ago = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.youtube.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.youtube.page_size, 25);
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.retry.delay_secs, 2);
        assert_eq!(config.output.path, PathBuf::from("/tmp/channels.csv"));
        assert_eq!(config.window.days_ago, 2);
        // Untouched sections keep defaults
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn missing_key_is_error() {
        let mut config = Config::default();
        config.youtube.api_key = None;
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn from_file_reports_path() {
        let err = Config::from_file(Path::new("/nonexistent/chanwatch.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/chanwatch.toml"));
    }
}
