//! Extractive summary and key-information mining over plain text.

use regex::Regex;
use sleuth_core::KeyInformation;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::text::truncate_chars;

const SUMMARY_SENTENCES: usize = 3;
const FALLBACK_SUMMARY_CHARS: usize = 200;

const MAX_NUMBERS: usize = 10;
const MAX_DATES: usize = 5;
const MAX_KEYWORDS: usize = 10;
/// Words must be strictly longer than this to count as keywords.
const MIN_KEYWORD_CHARS: usize = 3;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:,\d{3})*(?:\.\d+)?\b").expect("number pattern compiles"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b|\b\d{4}-\d{2}-\d{2}\b").expect("date pattern compiles")
});

/// First three period-delimited sentences, re-joined.
///
/// Falls back to the first 200 characters when the text has no non-empty
/// sentence at all.
pub fn summarize(content: &str) -> String {
    let sentences: Vec<&str> = content.split('.').map(str::trim).filter(|s| !s.is_empty()).collect();

    if sentences.is_empty() {
        return truncate_chars(content, FALLBACK_SUMMARY_CHARS);
    }

    let head = &sentences[..sentences.len().min(SUMMARY_SENTENCES)];
    format!("{}.", head.join(". "))
}

/// Numbers, dates and the most frequent long words in `content`.
pub fn key_information(content: &str) -> KeyInformation {
    let numbers = NUMBER_RE.find_iter(content).take(MAX_NUMBERS).map(|m| m.as_str().to_string()).collect();
    let dates = DATE_RE.find_iter(content).take(MAX_DATES).map(|m| m.as_str().to_string()).collect();

    let lowered = content.to_lowercase();
    let words = lowered.split_whitespace().filter(|w| w.chars().count() > MIN_KEYWORD_CHARS);
    let keywords = top_by_frequency(words, MAX_KEYWORDS);

    KeyInformation { numbers, dates, keywords }
}

/// The `limit` most frequent items, most frequent first.
///
/// Items with equal counts keep the order in which they were first seen.
pub fn top_by_frequency<I, S>(items: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let item = item.as_ref();
        match index.get(item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.to_string(), counts.len());
                counts.push((item.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(word, _)| word).collect()
}
