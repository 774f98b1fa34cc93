//! Core types and shared functionality for sleuth.
//!
//! This crate provides:
//! - The research data model (search results, extracted pages, summaries, bookmarks)
//! - A JSON-file cache store with insertion-ordered eviction
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{Bookmark, CacheEntry, CachePayload, CacheStore};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{
    ContentType, ExtractedContent, KeyInformation, RawResult, ResearchSummary, ResearchType, ScoredResult,
    SearchResult, SummaryBody,
};
