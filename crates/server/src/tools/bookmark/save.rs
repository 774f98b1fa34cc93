//! bookmark_save tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sleuth_client::ResearchAssistant;

use crate::tools::{json_result, require_non_empty};

/// Parameters for the bookmark_save tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkSaveParams {
    /// URL to bookmark.
    pub url: String,

    /// Display title.
    pub title: String,

    /// Free-form tags; duplicates collapse.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Implementation of the bookmark_save tool.
pub fn save_impl(assistant: &mut ResearchAssistant, params: BookmarkSaveParams) -> Result<CallToolResult, McpError> {
    require_non_empty("url", &params.url)?;

    let bookmark = assistant.save_bookmark(params.url.trim(), params.title.trim(), params.tags);
    json_result(&bookmark)
}
