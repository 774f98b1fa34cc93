//! Configuration validation rules.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 300_000;

fn check_timeout(field: &str, value: u64) -> Result<(), ConfigError> {
    if value < MIN_TIMEOUT_MS {
        return Err(ConfigError::Invalid { field: field.into(), reason: "must be at least 100ms".into() });
    }
    if value > MAX_TIMEOUT_MS {
        return Err(ConfigError::Invalid {
            field: field.into(),
            reason: "must not exceed 5 minutes (300000ms)".into(),
        });
    }
    Ok(())
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - either timeout is below 100ms or above 5 minutes
    /// - `user_agent` or `search_url` is empty
    /// - `cache_max_entries` or `cache_max_age_hours` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_timeout("search_timeout_ms", self.search_timeout_ms)?;
        check_timeout("extract_timeout_ms", self.extract_timeout_ms)?;

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.search_url.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "search_url".into(), reason: "must not be empty".into() });
        }

        if self.cache_max_entries == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_max_entries".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.cache_max_age_hours == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_max_age_hours".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.cache_max_entries < 100 {
            tracing::warn!(
                cache_max_entries = self.cache_max_entries,
                "small content cache; research summaries will refetch most pages"
            );
        }

        Ok(())
    }
}
