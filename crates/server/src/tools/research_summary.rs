//! research_summary tool implementation.
//!
//! Searches a topic, extracts the top hits one by one and fuses them.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sleuth_client::{DEFAULT_MAX_SOURCES, ResearchAssistant};
use sleuth_core::Error;

use super::{json_result, require_non_empty};

/// Each source is a sequential page fetch, so keep the fan-out small.
const MAX_SOURCES_LIMIT: usize = 10;

/// Input parameters for research_summary tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResearchSummaryParams {
    /// Topic to research (required).
    pub topic: String,

    /// Number of pages to extract and fuse (1-10, default 5).
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
}

fn default_max_sources() -> usize {
    DEFAULT_MAX_SOURCES
}

/// Implementation of the research_summary tool.
pub async fn summary_impl(
    assistant: &mut ResearchAssistant, params: ResearchSummaryParams,
) -> Result<CallToolResult, McpError> {
    require_non_empty("topic", &params.topic)?;

    if params.max_sources == 0 || params.max_sources > MAX_SOURCES_LIMIT {
        return Err(Error::InvalidInput(format!("max_sources must be between 1 and {MAX_SOURCES_LIMIT}")).into());
    }

    let summary = assistant.get_research_summary(params.topic.trim(), params.max_sources).await;
    json_result(&summary)
}
