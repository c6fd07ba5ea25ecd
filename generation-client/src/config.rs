use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::providers::{DEFAULT_MODEL, GEMINI_API_URL};
use crate::request::{ApiKey, ScorePolicy};

/// Environment variable consulted for the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API key (optional, can use env var instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL, without the `/models/...` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Treatment of ATS scores outside 0-100
    #[serde(default)]
    pub score_policy: ScorePolicy,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    GEMINI_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::HomeNotSet)?;
        Ok(PathBuf::from(home).join(".config/resume-tailor/config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pick the API key: explicit override, then `GEMINI_API_KEY`, then the config file
    pub fn resolve_api_key(&self, cli_override: Option<&str>) -> Option<ApiKey> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        self.pick_api_key(cli_override, from_env.as_deref())
    }

    fn pick_api_key(&self, cli_override: Option<&str>, from_env: Option<&str>) -> Option<ApiKey> {
        [cli_override, from_env, self.api_key.as_deref()]
            .into_iter()
            .flatten()
            .find(|key| !key.trim().is_empty())
            .map(ApiKey::new)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "model".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                message: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            score_policy: ScorePolicy::default(),
        }
    }
}
