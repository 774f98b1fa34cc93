//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use sleuth_client::ResearchAssistant;
use tokio::sync::Mutex;

use crate::tools::{
    BookmarkSaveParams, BookmarkSearchParams, CachePurgeParams, ResearchExtractParams, ResearchHistoryParams,
    ResearchSearchParams, ResearchSummaryParams, bookmark, cache, research_extract, research_history, research_search,
    research_summary,
};

/// The main MCP server handler for sleuth.
///
/// Tool calls are served one at a time: the assistant and its cache sit
/// behind a single async mutex.
#[derive(Clone)]
pub struct SleuthServer {
    assistant: Arc<Mutex<ResearchAssistant>>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl SleuthServer {
    /// Create a new server handler around `assistant`.
    pub fn new(assistant: ResearchAssistant) -> Self {
        Self { assistant: Arc::new(Mutex::new(assistant)), tool_router: Self::tool_router() }
    }

    #[tool(
        description = "Search the web via DuckDuckGo. The query is enhanced for the research type (general, academic, news, technical) and hits are scored for relevance, trust and content type. Results are cached for 24 hours."
    )]
    async fn research_search(&self, params: Parameters<ResearchSearchParams>) -> Result<CallToolResult, McpError> {
        let mut assistant = self.assistant.lock().await;
        research_search::search_impl(&mut assistant, params.0).await
    }

    #[tool(
        description = "Fetch a URL and extract its readable text, title, summary, numbers, dates and keywords. Results are cached for 24 hours."
    )]
    async fn research_extract(&self, params: Parameters<ResearchExtractParams>) -> Result<CallToolResult, McpError> {
        let mut assistant = self.assistant.lock().await;
        research_extract::extract_impl(&mut assistant, params.0).await
    }

    #[tool(
        description = "Research a topic: search, extract the top sources one by one and fuse them into an overview with common keywords."
    )]
    async fn research_summary(&self, params: Parameters<ResearchSummaryParams>) -> Result<CallToolResult, McpError> {
        let mut assistant = self.assistant.lock().await;
        research_summary::summary_impl(&mut assistant, params.0).await
    }

    #[tool(
        description = "List the searches run in this session, newest first, with their enhanced queries and hit counts."
    )]
    async fn research_history(&self, params: Parameters<ResearchHistoryParams>) -> Result<CallToolResult, McpError> {
        let assistant = self.assistant.lock().await;
        research_history::history_impl(&assistant, params.0)
    }

    #[tool(description = "Save a bookmark with optional tags. Saving the same URL twice keeps both entries.")]
    async fn bookmark_save(&self, params: Parameters<BookmarkSaveParams>) -> Result<CallToolResult, McpError> {
        let mut assistant = self.assistant.lock().await;
        bookmark::save_impl(&mut assistant, params.0)
    }

    #[tool(description = "Find bookmarks whose title, URL or tags contain the query (case-insensitive).")]
    async fn bookmark_search(&self, params: Parameters<BookmarkSearchParams>) -> Result<CallToolResult, McpError> {
        let assistant = self.assistant.lock().await;
        bookmark::search_impl(&assistant, params.0)
    }

    #[tool(description = "Purge cached searches and pages older than a number of hours, or all of them.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        let mut assistant = self.assistant.lock().await;
        cache::purge_impl(&mut assistant, params.0)
    }
}

impl ServerHandler for SleuthServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "sleuth".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
