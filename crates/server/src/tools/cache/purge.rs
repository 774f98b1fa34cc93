//! cache_purge tool implementation.
//!
//! Purges cached searches and pages by age, or all of them. Bookmarks are
//! never touched.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sleuth_client::ResearchAssistant;
use sleuth_core::Error;

use crate::tools::json_result;

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Purge entries at least this many hours old (default: the configured max age).
    #[serde(default)]
    pub older_than_hours: Option<u32>,

    /// Purge every entry regardless of age.
    #[serde(default)]
    pub all: bool,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// Number of entries deleted.
    pub deleted: usize,
    /// Number of entries left.
    pub remaining: usize,
}

/// Implementation of the cache_purge tool.
pub fn purge_impl(assistant: &mut ResearchAssistant, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    if params.all && params.older_than_hours.is_some() {
        return Err(Error::InvalidInput("Specify either all or older_than_hours, not both".to_string()).into());
    }

    let max_age_hours = params.older_than_hours.unwrap_or(assistant.max_age_hours());
    let store = assistant.store_mut();
    let deleted = if params.all { store.clear() } else { store.purge_expired(max_age_hours) };
    store.persist();

    tracing::debug!(deleted, remaining = store.len(), "purged content cache");

    json_result(&CachePurgeOutput { deleted, remaining: store.len() })
}
