//! bookmark_search tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sleuth_client::ResearchAssistant;
use sleuth_core::Bookmark;

use crate::tools::json_result;

/// Parameters for the bookmark_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkSearchParams {
    /// Case-insensitive substring matched against title, URL and tags.
    /// An empty query lists every bookmark.
    #[serde(default)]
    pub query: String,
}

/// Output from the bookmark_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookmarkSearchOutput {
    pub bookmarks: Vec<Bookmark>,
}

/// Implementation of the bookmark_search tool.
pub fn search_impl(assistant: &ResearchAssistant, params: BookmarkSearchParams) -> Result<CallToolResult, McpError> {
    let output = BookmarkSearchOutput { bookmarks: assistant.search_bookmarks(params.query.trim()) };
    json_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{assistant, output};

    #[test]
    fn test_search_impl() {
        let mut assistant = assistant(vec![], &[]);
        assistant.save_bookmark("https://tokio.rs/", "Tokio", vec!["async".into()]);
        assistant.save_bookmark("https://serde.rs/", "Serde", vec!["serialization".into()]);

        let found: BookmarkSearchOutput =
            output(&search_impl(&assistant, BookmarkSearchParams { query: "ASYNC".into() }).unwrap());
        assert_eq!(found.bookmarks.len(), 1);
        assert_eq!(found.bookmarks[0].title, "Tokio");

        let all: BookmarkSearchOutput =
            output(&search_impl(&assistant, BookmarkSearchParams { query: String::new() }).unwrap());
        assert_eq!(all.bookmarks.len(), 2);

        let none: BookmarkSearchOutput =
            output(&search_impl(&assistant, BookmarkSearchParams { query: "python".into() }).unwrap());
        assert!(none.bookmarks.is_empty());
    }
}
