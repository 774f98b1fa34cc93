//! Readable content extraction from raw HTML.
//!
//! ### Algorithm
//! - Drop `<script>` and `<style>` blocks with their contents.
//! - Replace remaining tags with spaces, collapse whitespace, cap at 2000 chars.
//! - Title from the first `<title>` element, else `No title found`.
//! - Summary from the first three period-delimited sentences.
//! - Key information: numbers, dates and the ten most frequent long words.
//!
//! ### Stable Abstraction
//! - Callers go through the `PageExtractor` trait so the regex engine can be
//!   swapped without touching the research pipeline.

pub mod summary;
pub mod text;

pub use summary::{key_information, summarize, top_by_frequency};
pub use text::{NO_TITLE, main_content, title, truncate_chars};

use sleuth_core::{Error, KeyInformation};

/// A page reduced to text, before it is stamped with URL and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub key_information: KeyInformation,
    pub word_count: usize,
}

/// Stable extractor trait for content extraction.
pub trait PageExtractor: Send + Sync {
    /// Extract readable content from HTML.
    fn extract(&self, html: &str) -> Result<ExtractedPage, Error>;
}

/// Regex-based extractor implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl PageExtractor for RegexExtractor {
    fn extract(&self, html: &str) -> Result<ExtractedPage, Error> {
        let content = main_content(html);
        let summary = summarize(&content);
        let key_information = key_information(&content);
        let word_count = content.split_whitespace().count();

        Ok(ExtractedPage { title: title(html), content, summary, key_information, word_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Async Rust in 2024</title>
  <style>p { margin: 0 }</style>
  <script>console.log("tracking");</script>
</head>
<body>
  <h1>Async Rust</h1>
  <p>Tokio passed 100,000 downloads per day on 2024-03-01. Async runtimes schedule tasks.</p>
  <p>Runtimes poll futures. Futures are lazy. Tasks are cheap.</p>
</body>
</html>"#;

    #[test]
    fn test_regex_extractor() {
        let page = RegexExtractor.extract(ARTICLE).unwrap();

        assert_eq!(page.title, "Async Rust in 2024");
        assert!(page.content.starts_with("Async Rust in 2024 Async Rust Tokio passed"));
        assert!(!page.content.contains("tracking"));
        assert!(!page.content.contains("margin"));
        assert_eq!(
            page.summary,
            "Async Rust in 2024 Async Rust Tokio passed 100,000 downloads per day on 2024-03-01. Async runtimes schedule tasks. Runtimes poll futures."
        );
        assert_eq!(page.key_information.numbers[0], "2024");
        assert!(page.key_information.numbers.contains(&"100,000".to_string()));
        assert_eq!(page.key_information.dates, vec!["2024-03-01".to_string()]);
        assert_eq!(page.key_information.keywords[0], "async");
        assert_eq!(page.word_count, page.content.split_whitespace().count());
    }

    #[test]
    fn test_regex_extractor_empty_page() {
        let page = RegexExtractor.extract("").unwrap();
        assert_eq!(page.title, NO_TITLE);
        assert_eq!(page.content, "");
        assert_eq!(page.summary, "");
        assert_eq!(page.word_count, 0);
        assert_eq!(page.key_information, KeyInformation::default());
    }
}
