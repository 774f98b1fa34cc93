//! Web search: query enhancement, the DuckDuckGo backend and result scoring.
//!
//! ### Backend
//!
//! - **Endpoint**: `https://html.duckduckgo.com/html/` (no API key)
//! - **Parameters**: `q` (the enhanced query) and `kl` (region, default `us-en`)
//! - **Timeout**: 10s
//! - **Parsing**: regex over the HTML results page, see [`parse`]
//!
//! A failed request surfaces as an `Err`; an empty page is `Ok(vec![])`.

pub mod enhance;
pub mod parse;
pub mod score;

pub use enhance::{ResearchTemplate, enhance};
pub use parse::{RegexResultParser, ResultParser};
pub use score::score;

use async_trait::async_trait;
use sleuth_core::{AppConfig, Error, RawResult};
use std::time::Instant;

use crate::fetch::{FetchClient, FetchConfig};

/// Anything that can turn a query into raw search hits.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawResult>, Error>;
}

/// DuckDuckGo HTML search client.
pub struct DuckDuckGoClient {
    fetch: FetchClient,
    search_url: String,
    region: String,
    parser: Box<dyn ResultParser>,
}

impl DuckDuckGoClient {
    pub fn new(fetch: FetchClient, search_url: impl Into<String>, region: impl Into<String>) -> Self {
        Self { fetch, search_url: search_url.into(), region: region.into(), parser: Box::new(RegexResultParser) }
    }

    /// Build a client with its own HTTP stack from application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let fetch = FetchClient::new(FetchConfig::from(config))?;
        Ok(Self::new(fetch, config.search_url.clone(), config.search_region.clone()))
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawResult>, Error> {
        let start = Instant::now();
        tracing::debug!("searching DuckDuckGo: query={}", query);

        let html = self
            .fetch
            .get_text(
                &self.search_url,
                &[("q", query), ("kl", self.region.as_str())],
                self.fetch.config().search_timeout,
            )
            .await?;

        let results = self.parser.parse(&html, max_results);

        tracing::debug!("search completed in {:?}, {} results", start.elapsed(), results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let client = DuckDuckGoClient::from_config(&AppConfig::default()).unwrap();
        assert_eq!(client.search_url, "https://html.duckduckgo.com/html/");
        assert_eq!(client.region, "us-en");
    }

    #[tokio::test]
    async fn test_search_parses_served_page() {
        let page = r#"<div class="result">
  <a rel="nofollow" class="result__a" href="https://tokio.rs/">Tokio</a>
  <a class="result__snippet" href="https://tokio.rs/">An asynchronous runtime.</a>
  <a class="result__url" href="https://tokio.rs/">tokio.rs</a>
</div>"#;
        let endpoint = crate::fetch::testing::serve_once("200 OK", "text/html", page).await;
        let client = DuckDuckGoClient::new(FetchClient::new(FetchConfig::default()).unwrap(), endpoint, "us-en");

        let results = client.search("tokio", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://tokio.rs/");
        assert_eq!(results[0].snippet, "An asynchronous runtime.");
    }

    #[tokio::test]
    async fn test_error_status_is_http_error() {
        let endpoint = crate::fetch::testing::serve_once("503 Service Unavailable", "text/html", "").await;
        let client = DuckDuckGoClient::new(FetchClient::new(FetchConfig::default()).unwrap(), endpoint, "us-en");

        let result = client.search("tokio", 5).await;
        assert!(matches!(result, Err(Error::HttpError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let fetch = FetchClient::new(FetchConfig {
            search_timeout: std::time::Duration::from_millis(500),
            ..FetchConfig::default()
        })
        .unwrap();
        let client = DuckDuckGoClient::new(fetch, "http://127.0.0.1:9/html/", "us-en");

        let result = client.search("rust", 5).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().is_network());
    }
}
