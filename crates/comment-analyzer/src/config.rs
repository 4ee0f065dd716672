use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

use crate::analyzer::DEFAULT_BASE_URL;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with CA_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub defaults: RequestDefaults,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API key sent as the `key` query parameter (required — no compiled-in default).
    #[serde(default)]
    pub key: String,

    /// API root, without the `comments:{method}` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("key_set", &!self.key.is_empty())
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Field values applied to every request built by the CLI unless a flag overrides them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RequestDefaults {
    /// Language codes to send with each request.
    /// Accepts either an array or comma-separated string.
    /// Example: `["en"]` or `"en,fr"`
    #[serde(default, deserialize_with = "deserialize_languages")]
    pub languages: Vec<String>,

    /// Ask the API not to store submitted comments.
    #[serde(default)]
    pub do_not_store: bool,
}

/// Deserialize languages from comma-separated string or array, filtering empty values.
fn deserialize_languages<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let languages: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(languages
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_ms() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                key: String::new(),
                base_url: default_base_url(),
                timeout_ms: default_timeout_ms(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
            defaults: RequestDefaults::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with CA_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("CA_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.key.is_empty() {
            return Err(ConfigError::Validation(
                "api.key is required. Set CA_API__KEY environment variable or configure in config.yaml.".into(),
            ));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "api.base_url '{}' must start with http:// or https://",
                self.api.base_url
            )));
        }

        if self.api.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_ms cannot be 0".into(),
            ));
        }

        Ok(())
    }
}
