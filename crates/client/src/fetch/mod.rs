//! HTTP fetch layer.
//!
//! ### Requests
//! - One GET per call, no retries.
//! - Every request carries a desktop browser User-Agent.
//! - Each call has its own timeout: 10s for search pages, 15s for content pages.
//!
//! ### Failures
//! - Timeouts map to `FETCH_TIMEOUT`, non-2xx statuses to `HTTP_ERROR`, and
//!   connection or body errors to `NETWORK_ERROR`.
//! - Page fetches also reject bodies whose `Content-Type` is not text
//!   (`EXTRACT_FAILED`); a missing header is accepted.

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use sleuth_core::{AppConfig, Error};
use std::time::{Duration, Instant};
use url::Url;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: desktop Chrome)
    pub user_agent: String,

    /// Timeout for search result pages (default: 10s)
    pub search_timeout: Duration,

    /// Timeout for content pages (default: 15s)
    pub page_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            search_timeout: config.search_timeout(),
            page_timeout: config.extract_timeout(),
        }
    }
}

/// Source of raw page HTML for the content extractor.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, Error>;
}

/// HTTP client shared by the search backend and the content extractor.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// GET `url` with `query` parameters and return the body as text.
    pub async fn get_text(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<String, Error> {
        let start = Instant::now();
        let response = self.send(url, query, timeout).await?;
        read_body(url, response, start).await
    }

    async fn send(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<Response, Error> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {} from {}", status.as_u16(), url)));
        }

        Ok(response)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl PageSource for FetchClient {
    async fn fetch_page(&self, url: &str) -> Result<String, Error> {
        let start = Instant::now();
        let url = page_url(url)?;
        let response = self.send(url.as_str(), &[], self.config.page_timeout).await?;

        if let Some(mime) = response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok())
            && !is_textual(mime)
        {
            return Err(Error::ExtractFailed(format!("unsupported content type {mime} at {url}")));
        }

        read_body(url.as_str(), response, start).await
    }
}

/// Parse a user-supplied page address.
///
/// Bare hosts get `https://`, fragments are dropped and only http(s) is allowed.
fn page_url(input: &str) -> Result<Url, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("empty URL".into()));
    }

    let mut url = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("https://{trimmed}"))
    }
    .map_err(|e| Error::InvalidUrl(format!("{trimmed}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!("unsupported scheme {} in {trimmed}", url.scheme())));
    }
    url.set_fragment(None);

    Ok(url)
}

fn is_textual(mime: &str) -> bool {
    let mime = mime.to_ascii_lowercase();
    mime.starts_with("text/") || mime.contains("html") || mime.contains("xml")
}

async fn read_body(url: &str, response: Response, start: Instant) -> Result<String, Error> {
    let body = response.text().await.map_err(map_reqwest_error)?;
    tracing::debug!("fetched {} in {}ms ({} bytes)", url, start.elapsed().as_millis(), body.len());
    Ok(body)
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout(err.to_string())
    } else {
        Error::Network(err.to_string())
    }
}
