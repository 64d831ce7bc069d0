//! Configuration file
//!
//! `config.toml` under the config root:
//!
//! ```toml
//! [backend]
//! base_url = "http://127.0.0.1:8000"
//! timeout_secs = 30
//!
//! [identity]
//! provider = "firebase"            # or "stub"
//! api_key = "env:ALTHEA_FIREBASE_API_KEY"
//!
//! [lookup]
//! search_url = "https://medlineplus.gov/search?searchquery={term}"
//! ```
//!
//! A missing file means all defaults. `env:NAME` values are read from the
//! environment when the app is built.

use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;

use crate::transport::DEFAULT_TIMEOUT_SECS;
use crate::ui::DEFAULT_SEARCH_URL;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_API_KEY: &str = "env:ALTHEA_FIREBASE_API_KEY";
pub const DEFAULT_STUB_TOKEN: &str = "env:ALTHEA_TOKEN";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Environment variable {0} is not set")]
    MissingEnv(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub identity: IdentityConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// "firebase" or "stub"
    pub provider: String,
    /// Web API key (firebase)
    pub api_key: String,
    /// Pre-issued token (stub)
    pub token: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            provider: "firebase".to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            token: DEFAULT_STUB_TOKEN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// External search template, `{term}` is replaced
    pub search_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `config.toml` from the config root (defaults if absent)
    pub fn load(config_root: &Path) -> Result<Self, ConfigError> {
        let path = config_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path, source })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.backend.base_url).map_err(|e| {
            ConfigError::Invalid(format!("backend.base_url '{}': {}", self.backend.base_url, e))
        })?;
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "backend.timeout_secs must be positive".to_string(),
            ));
        }
        if !self.lookup.search_url.contains("{term}") {
            return Err(ConfigError::Invalid(
                "lookup.search_url must contain {term}".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve an `env:NAME` reference; other values are returned as-is
pub fn resolve_env_var(value: &str) -> Result<String, ConfigError> {
    match value.strip_prefix("env:") {
        Some(name) => std::env::var(name).map_err(|_| ConfigError::MissingEnv(name.to_string())),
        None => Ok(value.to_string()),
    }
}
