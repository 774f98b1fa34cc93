//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SLEUTH_*)
//! 2. TOML config file (if SLEUTH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Desktop browser identification; the HTML search endpoint rejects clients without one.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SLEUTH_*)
/// 2. TOML config file (if SLEUTH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `content_cache.json` and `bookmarks.json`.
    ///
    /// Set via SLEUTH_CACHE_DIR environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via SLEUTH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTML search endpoint.
    ///
    /// Set via SLEUTH_SEARCH_URL environment variable.
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Region hint sent as the `kl` parameter.
    #[serde(default = "default_search_region")]
    pub search_region: String,

    /// Search request timeout in milliseconds.
    #[serde(default = "default_search_timeout_ms")]
    pub search_timeout_ms: u64,

    /// Page fetch timeout in milliseconds.
    #[serde(default = "default_extract_timeout_ms")]
    pub extract_timeout_ms: u64,

    /// Content cache entries kept after each persist.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Age after which cached entries are refetched.
    #[serde(default = "default_cache_max_age_hours")]
    pub cache_max_age_hours: u32,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./web_cache")
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.into()
}

fn default_search_url() -> String {
    "https://html.duckduckgo.com/html/".into()
}

fn default_search_region() -> String {
    "us-en".into()
}

fn default_search_timeout_ms() -> u64 {
    10_000
}

fn default_extract_timeout_ms() -> u64 {
    15_000
}

fn default_cache_max_entries() -> usize {
    1000
}

fn default_cache_max_age_hours() -> u32 {
    24
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            user_agent: default_user_agent(),
            search_url: default_search_url(),
            search_region: default_search_region(),
            search_timeout_ms: default_search_timeout_ms(),
            extract_timeout_ms: default_extract_timeout_ms(),
            cache_max_entries: default_cache_max_entries(),
            cache_max_age_hours: default_cache_max_age_hours(),
        }
    }
}

impl AppConfig {
    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    pub fn extract_timeout(&self) -> Duration {
        Duration::from_millis(self.extract_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered provider stack used by [`AppConfig::load`].
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SLEUTH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("SLEUTH_")
                .ignore(&["CONFIG_FILE", "LOG"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
