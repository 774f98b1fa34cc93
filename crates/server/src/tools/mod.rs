//! MCP tool implementations.
//!
//! This module contains all tools exposed by the sleuth server. Every tool
//! takes the locked [`ResearchAssistant`](sleuth_client::ResearchAssistant)
//! and answers with pretty-printed JSON text.

pub mod bookmark;
pub mod cache;
pub mod research_extract;
pub mod research_history;
pub mod research_search;
pub mod research_summary;

pub use bookmark::{BookmarkSaveParams, BookmarkSearchParams};
pub use cache::CachePurgeParams;
pub use research_extract::ResearchExtractParams;
pub use research_history::ResearchHistoryParams;
pub use research_search::ResearchSearchParams;
pub use research_summary::ResearchSummaryParams;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use sleuth_core::Error;

/// Serialize `output` as the single text content of a successful result.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Reject blank string parameters.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), McpError> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} cannot be empty")).into());
    }
    Ok(())
}
