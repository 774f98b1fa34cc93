//! Research pipeline: cached search, cached extraction and multi-source summaries.
//!
//! ### Flow
//! - `intelligent_search`: enhance query -> cache lookup -> backend search -> score -> cache.
//! - `extract_content`: cache lookup -> fetch page -> extract -> cache.
//! - `get_research_summary`: search, then extract the top hits one after another and fuse.
//!
//! All steps run strictly in sequence. The assistant owns its [`CacheStore`]
//! and persists it after every mutation.

pub mod fuse;

pub use fuse::{NO_CONTENT_OVERVIEW, fuse};

use chrono::Utc;
use sleuth_core::cache::hash::{content_key, search_key};
use sleuth_core::cache::{DEFAULT_MAX_AGE_HOURS, DEFAULT_MAX_ENTRIES};
use sleuth_core::{
    AppConfig, Bookmark, CachePayload, CacheStore, Error, ExtractedContent, ResearchSummary, ResearchType,
    SearchResult,
};

use crate::extract::{PageExtractor, RegexExtractor};
use crate::fetch::{FetchClient, FetchConfig, PageSource};
use crate::search::{DuckDuckGoClient, SearchBackend, enhance, score};

/// Default number of hits requested per search.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default number of pages fused into a research summary.
pub const DEFAULT_MAX_SOURCES: usize = 5;

/// Web research assistant tying search, extraction and the cache together.
pub struct ResearchAssistant {
    store: CacheStore,
    backend: Box<dyn SearchBackend>,
    pages: Box<dyn PageSource>,
    extractor: Box<dyn PageExtractor>,
    max_age_hours: u32,
    history: Vec<SearchResult>,
}

impl ResearchAssistant {
    pub fn new(store: CacheStore, backend: Box<dyn SearchBackend>, pages: Box<dyn PageSource>) -> Self {
        Self {
            store,
            backend,
            pages,
            extractor: Box::new(RegexExtractor),
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
            history: Vec::new(),
        }
    }

    /// Open the on-disk cache and build the DuckDuckGo stack from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let store = CacheStore::open(&config.cache_dir, config.cache_max_entries)?;
        let fetch = FetchClient::new(FetchConfig::from(config))?;
        let backend = DuckDuckGoClient::new(fetch.clone(), config.search_url.clone(), config.search_region.clone());

        Ok(Self::new(store, Box::new(backend), Box::new(fetch)).with_max_age_hours(config.cache_max_age_hours))
    }

    /// Ephemeral assistant with no cache directory.
    pub fn in_memory(backend: Box<dyn SearchBackend>, pages: Box<dyn PageSource>) -> Self {
        Self::new(CacheStore::open_in_memory(DEFAULT_MAX_ENTRIES), backend, pages)
    }

    pub fn with_max_age_hours(mut self, hours: u32) -> Self {
        self.max_age_hours = hours;
        self
    }

    /// Search with type-specific query enhancement, scoring and caching.
    ///
    /// A fresh cached result for the same enhanced query, type and size is
    /// returned with `from_cache` set. A backend failure does not fail the
    /// call: the result is empty, carries `backend_error`, and is not cached.
    pub async fn intelligent_search(
        &mut self, query: &str, search_type: ResearchType, max_results: usize,
    ) -> SearchResult {
        let enhanced_query = enhance(query, search_type);
        let key = search_key(&enhanced_query, search_type, max_results);

        if let Some(entry) = self.store.get_fresh(&key, self.max_age_hours)
            && let CachePayload::Search(cached) = &entry.payload
        {
            tracing::debug!("cache hit for search query: {}", query);
            let mut result = cached.clone();
            result.from_cache = true;
            self.history.push(result.clone());
            return result;
        }

        let raw = match self.backend.search(&enhanced_query, max_results).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("search failed for {:?}: {}", enhanced_query, e);
                return SearchResult {
                    query: query.to_string(),
                    enhanced_query,
                    search_type,
                    results: Vec::new(),
                    timestamp: Utc::now().to_rfc3339(),
                    total_results: 0,
                    from_cache: false,
                    backend_error: Some(e.to_string()),
                };
            }
        };

        let results = score(raw, query, search_type);
        let result = SearchResult {
            query: query.to_string(),
            enhanced_query,
            search_type,
            total_results: results.len(),
            results,
            timestamp: Utc::now().to_rfc3339(),
            from_cache: false,
            backend_error: None,
        };

        self.store.put(key, CachePayload::Search(result.clone()));
        self.history.push(result.clone());
        self.store.persist();

        result
    }

    /// Fetch `url` and reduce it to text, summary and key information.
    ///
    /// Fresh cached extractions are returned with `from_cache` set.
    pub async fn extract_content(&mut self, url: &str) -> Result<ExtractedContent, Error> {
        let key = content_key(url);

        if let Some(entry) = self.store.get_fresh(&key, self.max_age_hours)
            && let CachePayload::Content(cached) = &entry.payload
        {
            tracing::debug!("cache hit for content: {}", url);
            let mut content = cached.clone();
            content.from_cache = true;
            return Ok(content);
        }

        let html = self.pages.fetch_page(url).await?;
        let page = self.extractor.extract(&html)?;

        let content = ExtractedContent {
            url: url.to_string(),
            title: page.title,
            content: page.content,
            summary: page.summary,
            key_information: page.key_information,
            word_count: page.word_count,
            timestamp: Utc::now().to_rfc3339(),
            from_cache: false,
        };

        self.store.put(key, CachePayload::Content(content.clone()));
        self.store.persist();

        Ok(content)
    }

    /// Search `topic`, extract the top `max_sources` hits and fuse them.
    ///
    /// Pages that fail to extract are logged and left out. With no surviving
    /// page the summary says so instead of failing.
    pub async fn get_research_summary(&mut self, topic: &str, max_sources: usize) -> ResearchSummary {
        let search = self
            .intelligent_search(topic, ResearchType::General, max_sources.saturating_mul(2))
            .await;

        let mut extracted = Vec::new();
        for hit in search.results.iter().take(max_sources) {
            match self.extract_content(&hit.url).await {
                Ok(content) => extracted.push(content),
                Err(e) => tracing::warn!("skipping source {}: {}", hit.url, e),
            }
        }

        ResearchSummary {
            topic: topic.to_string(),
            sources_used: extracted.len(),
            summary: fuse(&extracted),
            source_urls: extracted.iter().map(|c| c.url.clone()).collect(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Save a bookmark. Saving the same URL again adds a second entry.
    pub fn save_bookmark(&mut self, url: &str, title: &str, tags: Vec<String>) -> Bookmark {
        let bookmark = Bookmark::new(url, title, tags);
        self.store.add_bookmark(bookmark.clone());
        bookmark
    }

    pub fn search_bookmarks(&self, query: &str) -> Vec<Bookmark> {
        self.store.search_bookmarks(query)
    }

    /// Searches run this session, oldest first, cache hits included.
    pub fn history(&self) -> &[SearchResult] {
        &self.history
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CacheStore {
        &mut self.store
    }

    pub fn max_age_hours(&self) -> u32 {
        self.max_age_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sleuth_core::RawResult;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend returning canned hits and counting calls.
    struct FakeBackend {
        hits: Vec<RawResult>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FakeBackend {
        fn new(urls: &[&str]) -> Self {
            let hits = urls
                .iter()
                .map(|url| RawResult {
                    title: format!("Rust page {url}"),
                    url: url.to_string(),
                    display_url: url.to_string(),
                    snippet: "about rust".to_string(),
                    source: "fake".to_string(),
                })
                .collect();
            Self { hits, fail: false, calls: Arc::new(AtomicUsize::new(0)) }
        }

        fn failing() -> Self {
            Self { hits: Vec::new(), fail: true, calls: Arc::new(AtomicUsize::new(0)) }
        }
    }

    #[async_trait]
    impl SearchBackend for FakeBackend {
        async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<RawResult>, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Network("connection refused".into()));
            }
            Ok(self.hits.iter().take(max_results).cloned().collect())
        }
    }

    /// Page source serving HTML from a map; unknown URLs time out.
    struct FakePages {
        pages: HashMap<String, String>,
        calls: Arc<AtomicUsize>,
    }

    impl FakePages {
        fn new(pages: &[(&str, String)]) -> Self {
            Self {
                pages: pages.iter().map(|(u, h)| (u.to_string(), h.clone())).collect(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl PageSource for FakePages {
        async fn fetch_page(&self, url: &str) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages.get(url).cloned().ok_or_else(|| Error::FetchTimeout(format!("timed out fetching {url}")))
        }
    }

    fn page(title: &str, body: &str) -> String {
        format!("<html><head><title>{title}</title></head><body><p>{body}</p></body></html>")
    }

    #[tokio::test]
    async fn test_intelligent_search_scores_and_caches() {
        let backend = FakeBackend::new(&["https://a.example/", "https://rust.example/"]);
        let calls = backend.calls.clone();
        let mut assistant = ResearchAssistant::in_memory(Box::new(backend), Box::new(FakePages::new(&[])));

        let first = assistant.intelligent_search("rust", ResearchType::Academic, 10).await;
        assert_eq!(first.enhanced_query, "rust pdf site:scholar.google.com");
        assert_eq!(first.total_results, 2);
        assert!(!first.from_cache);
        assert_eq!(first.results[0].url, "https://rust.example/");

        let second = assistant.intelligent_search("rust", ResearchType::Academic, 10).await;
        assert!(second.from_cache);
        assert_eq!(second.results.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // different size is a different key
        assistant.intelligent_search("rust", ResearchType::Academic, 5).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert_eq!(assistant.history().len(), 3);
        assert!(assistant.history()[1].from_cache);
    }

    #[tokio::test]
    async fn test_stale_search_is_refetched() {
        let backend = FakeBackend::new(&["https://a.example/"]);
        let calls = backend.calls.clone();
        let mut assistant =
            ResearchAssistant::in_memory(Box::new(backend), Box::new(FakePages::new(&[]))).with_max_age_hours(0);

        assistant.intelligent_search("rust", ResearchType::General, 10).await;
        let again = assistant.intelligent_search("rust", ResearchType::General, 10).await;
        assert!(!again.from_cache);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_search_endpoint_error_status_degrades_to_empty() {
        let endpoint = crate::fetch::testing::serve_once("503 Service Unavailable", "text/html", "busy").await;
        let fetch = FetchClient::new(FetchConfig::default()).unwrap();
        let backend = DuckDuckGoClient::new(fetch, endpoint, "us-en");
        let mut assistant = ResearchAssistant::in_memory(Box::new(backend), Box::new(FakePages::new(&[])));

        let result = assistant.intelligent_search("rust", ResearchType::General, 10).await;
        assert!(result.results.is_empty());
        assert_eq!(result.total_results, 0);
        assert!(result.backend_error.as_deref().is_some_and(|e| e.contains("503")));
        assert!(assistant.store().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_is_empty_and_not_cached() {
        let backend = FakeBackend::failing();
        let calls = backend.calls.clone();
        let mut assistant = ResearchAssistant::in_memory(Box::new(backend), Box::new(FakePages::new(&[])));

        let result = assistant.intelligent_search("rust", ResearchType::News, 10).await;
        assert!(result.results.is_empty());
        assert_eq!(result.total_results, 0);
        assert!(result.backend_error.as_deref().unwrap().starts_with("NETWORK_ERROR"));
        assert!(assistant.store().is_empty());

        assistant.intelligent_search("rust", ResearchType::News, 10).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_results_is_not_an_error() {
        let mut assistant =
            ResearchAssistant::in_memory(Box::new(FakeBackend::new(&[])), Box::new(FakePages::new(&[])));
        let result = assistant.intelligent_search("nothing", ResearchType::General, 10).await;
        assert!(result.results.is_empty());
        assert!(result.backend_error.is_none());
        assert_eq!(assistant.store().len(), 1);
    }

    #[tokio::test]
    async fn test_extract_content_caches() {
        let pages = FakePages::new(&[("https://a.example/", page("Alpha", "Alpha is first. It has 3 parts."))]);
        let calls = pages.calls.clone();
        let mut assistant = ResearchAssistant::in_memory(Box::new(FakeBackend::new(&[])), Box::new(pages));

        let first = assistant.extract_content("https://a.example/").await.unwrap();
        assert_eq!(first.title, "Alpha");
        assert_eq!(first.summary, "Alpha Alpha is first. It has 3 parts.");
        assert!(!first.from_cache);

        let second = assistant.extract_content("https://a.example/").await.unwrap();
        assert!(second.from_cache);
        assert_eq!(second.summary, first.summary);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_extract_content_error() {
        let mut assistant =
            ResearchAssistant::in_memory(Box::new(FakeBackend::new(&[])), Box::new(FakePages::new(&[])));
        let err = assistant.extract_content("https://missing.example/").await.unwrap_err();
        assert!(matches!(err, Error::FetchTimeout(_)));
        assert!(assistant.store().is_empty());
    }

    #[tokio::test]
    async fn test_summary_skips_failed_sources() {
        let backend = FakeBackend::new(&["https://a.example/", "https://b.example/", "https://c.example/"]);
        let pages = FakePages::new(&[("https://b.example/", page("Beta", "Borrowing rules matter. Lifetimes too."))]);
        let mut assistant = ResearchAssistant::in_memory(Box::new(backend), Box::new(pages));

        let summary = assistant.get_research_summary("rust", 3).await;
        assert_eq!(summary.sources_used, 1);
        assert_eq!(summary.source_urls, vec!["https://b.example/".to_string()]);
        assert_eq!(summary.summary.source_count, 1);
        assert_eq!(summary.summary.overview, "Beta Borrowing rules matter. Lifetimes too.");
        assert!(summary.summary.common_keywords.contains(&"borrowing".to_string()));
    }

    #[tokio::test]
    async fn test_summary_extracts_only_top_sources() {
        let backend = FakeBackend::new(&["https://a.example/", "https://b.example/", "https://c.example/"]);
        let pages = FakePages::new(&[
            ("https://a.example/", page("A", "One.")),
            ("https://b.example/", page("B", "Two.")),
            ("https://c.example/", page("C", "Three.")),
        ]);
        let calls = pages.calls.clone();
        let mut assistant = ResearchAssistant::in_memory(Box::new(backend), Box::new(pages));

        let summary = assistant.get_research_summary("rust", 2).await;
        assert_eq!(summary.sources_used, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_summary_with_no_sources() {
        let mut assistant =
            ResearchAssistant::in_memory(Box::new(FakeBackend::failing()), Box::new(FakePages::new(&[])));
        let summary = assistant.get_research_summary("rust", 5).await;
        assert_eq!(summary.sources_used, 0);
        assert_eq!(summary.summary.overview, NO_CONTENT_OVERVIEW);
        assert!(summary.source_urls.is_empty());
    }

    #[tokio::test]
    async fn test_bookmarks_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path(), DEFAULT_MAX_ENTRIES).unwrap();
        let mut assistant =
            ResearchAssistant::new(store, Box::new(FakeBackend::new(&[])), Box::new(FakePages::new(&[])));

        let a = assistant.save_bookmark("https://doc.rust-lang.org/book/", "The Book", vec!["rust".into()]);
        let b = assistant.save_bookmark("https://doc.rust-lang.org/book/", "The Book again", vec![]);
        assert_eq!(a.id, b.id);

        let reopened = CacheStore::open(dir.path(), DEFAULT_MAX_ENTRIES).unwrap();
        assert_eq!(reopened.bookmarks().len(), 2);
        assert_eq!(assistant.search_bookmarks("RUST").len(), 2);
        assert_eq!(assistant.search_bookmarks("again").len(), 1);
    }
}
