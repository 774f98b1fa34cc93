//! research_extract tool implementation.
//!
//! Fetches a page and returns its text, summary and key information.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sleuth_client::ResearchAssistant;

use super::{json_result, require_non_empty};

/// Input parameters for research_extract tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResearchExtractParams {
    /// Absolute http(s) URL of the page to extract.
    pub url: String,
}

/// Implementation of the research_extract tool.
pub async fn extract_impl(
    assistant: &mut ResearchAssistant, params: ResearchExtractParams,
) -> Result<CallToolResult, McpError> {
    require_non_empty("url", &params.url)?;

    let content = assistant.extract_content(params.url.trim()).await?;
    json_result(&content)
}
