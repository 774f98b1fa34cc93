//! research_history tool implementation.
//!
//! Lists the searches run in this server session, newest first. Hits are
//! left out; repeat the search to get them back from the cache.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sleuth_client::ResearchAssistant;
use sleuth_core::{Error, ResearchType, SearchResult};

use super::json_result;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 200;

/// Input parameters for research_history tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ResearchHistoryParams {
    /// Number of searches to return (1-200, default 20).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One search from the session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryEntry {
    pub query: String,
    pub enhanced_query: String,
    #[schemars(with = "String")]
    pub search_type: ResearchType,
    pub total_results: usize,
    pub from_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_error: Option<String>,
    pub timestamp: String,
}

impl From<&SearchResult> for HistoryEntry {
    fn from(search: &SearchResult) -> Self {
        Self {
            query: search.query.clone(),
            enhanced_query: search.enhanced_query.clone(),
            search_type: search.search_type,
            total_results: search.total_results,
            from_cache: search.from_cache,
            backend_error: search.backend_error.clone(),
            timestamp: search.timestamp.clone(),
        }
    }
}

/// Output from the research_history tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResearchHistoryOutput {
    /// Searches this session, including cache hits.
    pub total: usize,
    pub searches: Vec<HistoryEntry>,
}

/// Implementation of the research_history tool.
pub fn history_impl(assistant: &ResearchAssistant, params: ResearchHistoryParams) -> Result<CallToolResult, McpError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(Error::InvalidInput(format!("limit must be between 1 and {MAX_LIMIT}")).into());
    }

    let history = assistant.history();
    let output = ResearchHistoryOutput {
        total: history.len(),
        searches: history.iter().rev().take(limit).map(HistoryEntry::from).collect(),
    };
    json_result(&output)
}
