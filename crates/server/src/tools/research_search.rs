//! research_search tool implementation.
//!
//! Runs an enhanced, scored and cached DuckDuckGo search.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sleuth_client::{DEFAULT_MAX_RESULTS, ResearchAssistant};
use sleuth_core::{Error, ResearchType};

use super::{json_result, require_non_empty};

/// Upper bound on `max_results`; one results page rarely holds more.
const MAX_RESULTS_LIMIT: usize = 50;

/// Input parameters for research_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResearchSearchParams {
    /// Search query (required).
    pub query: String,

    /// Research type: general (default), academic, news or technical.
    /// Unrecognized names run as general.
    #[serde(default)]
    #[schemars(with = "String")]
    pub search_type: ResearchType,

    /// Maximum number of results (1-50, default 10).
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// Implementation of the research_search tool.
pub async fn search_impl(
    assistant: &mut ResearchAssistant, params: ResearchSearchParams,
) -> Result<CallToolResult, McpError> {
    require_non_empty("query", &params.query)?;

    if params.max_results == 0 || params.max_results > MAX_RESULTS_LIMIT {
        return Err(Error::InvalidInput(format!("max_results must be between 1 and {MAX_RESULTS_LIMIT}")).into());
    }

    let result = assistant
        .intelligent_search(params.query.trim(), params.search_type, params.max_results)
        .await;

    json_result(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{assistant, hit, output};
    use sleuth_core::SearchResult;

    fn params(query: &str) -> ResearchSearchParams {
        ResearchSearchParams { query: query.into(), search_type: ResearchType::Technical, max_results: 10 }
    }

    #[tokio::test]
    async fn test_search_impl() {
        let mut assistant = assistant(
            vec![hit("Unrelated", "https://a.example/"), hit("Tokio guide", "https://tokio.rs/tokio/tutorial")],
            &[],
        );

        let result = search_impl(&mut assistant, params("tokio")).await.unwrap();
        let first: SearchResult = output(&result);

        assert_eq!(first.enhanced_query, "tokio guide site:stackoverflow.com");
        assert_eq!(first.total_results, 2);
        assert_eq!(first.results[0].url, "https://tokio.rs/tokio/tutorial");
        assert!(!first.from_cache);

        let result = search_impl(&mut assistant, params("tokio")).await.unwrap();
        let again: SearchResult = output(&result);
        assert!(again.from_cache);
    }

    #[tokio::test]
    async fn test_search_impl_empty_query() {
        let mut assistant = assistant(vec![], &[]);
        let err = search_impl(&mut assistant, params("   ")).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_search_impl_bad_max_results() {
        let mut assistant = assistant(vec![], &[]);
        let params = ResearchSearchParams { max_results: 0, ..params("rust") };
        assert!(search_impl(&mut assistant, params).await.is_err());
    }

    #[test]
    fn test_params_defaults() {
        let params: ResearchSearchParams = serde_json::from_str(r#"{"query": "rust"}"#).unwrap();
        assert_eq!(params.search_type, ResearchType::General);
        assert_eq!(params.max_results, DEFAULT_MAX_RESULTS);

        let params: ResearchSearchParams =
            serde_json::from_str(r#"{"query": "rust", "search_type": "news", "max_results": 3}"#).unwrap();
        assert_eq!(params.search_type, ResearchType::News);
        assert_eq!(params.max_results, 3);
    }

    #[test]
    fn test_params_unknown_search_type_is_general() {
        let params: ResearchSearchParams =
            serde_json::from_str(r#"{"query": "rust", "search_type": "cooking"}"#).unwrap();
        assert_eq!(params.search_type, ResearchType::General);
    }

    #[tokio::test]
    async fn test_search_impl_unknown_search_type_passes_query_through() {
        let mut assistant = assistant(vec![hit("Rust", "https://www.rust-lang.org/")], &[]);
        let params: ResearchSearchParams =
            serde_json::from_str(r#"{"query": "rust ownership", "search_type": "cooking"}"#).unwrap();

        let result = search_impl(&mut assistant, params).await.unwrap();
        let body: SearchResult = output(&result);
        assert_eq!(body.search_type, ResearchType::General);
        assert_eq!(body.enhanced_query, "rust ownership");
    }
}
