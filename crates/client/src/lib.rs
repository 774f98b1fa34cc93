//! Client code for sleuth.
//!
//! This crate provides the HTTP fetch layer, DuckDuckGo search, regex content
//! extraction and the research pipeline shared by the server and CLI.

pub mod extract;
pub mod fetch;
pub mod research;
pub mod search;

pub use extract::{ExtractedPage, PageExtractor, RegexExtractor};
pub use fetch::{FetchClient, FetchConfig, PageSource};
pub use research::{DEFAULT_MAX_RESULTS, DEFAULT_MAX_SOURCES, ResearchAssistant};
pub use search::{DuckDuckGoClient, RegexResultParser, ResultParser, SearchBackend};
