//! Relevance, trust and content-type scoring of raw search hits.

use regex::Regex;
use sleuth_core::{ContentType, RawResult, ResearchType, ScoredResult};
use std::cmp::Ordering;
use std::sync::LazyLock;

const TITLE_WEIGHT: f64 = 0.4;
const SNIPPET_WEIGHT: f64 = 0.3;
const URL_WEIGHT: f64 = 0.2;
const AUTHORITY_BONUS: f64 = 0.1;

const AUTHORITY_MARKERS: &[&str] = &["wikipedia", "edu", "gov", "org"];

const HIGH_TRUST: &[&str] = &["wikipedia.org", "edu", "gov", "org", "mit.edu", "stanford.edu"];
const MEDIUM_TRUST: &[&str] = &["reddit.com", "stackoverflow.com", "github.com"];
const LOW_TRUST: &[&str] = &["blogspot", "wordpress", "tumblr"];

static DATE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"\d{1,2}/\d{1,2}/\d{4}").expect("slash date pattern compiles"),
        Regex::new(r"\d{4}-\d{2}-\d{2}").expect("iso date pattern compiles"),
        Regex::new(r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) \d{1,2}, \d{4}")
            .expect("month date pattern compiles"),
    ]
});

/// Annotate every hit and order by relevance, highest first.
///
/// The sort is stable, so hits with equal relevance keep their page order.
/// Scoring is currently the same for every research type.
pub fn score(raw: Vec<RawResult>, query: &str, _search_type: ResearchType) -> Vec<ScoredResult> {
    let mut scored: Vec<ScoredResult> = raw.into_iter().map(|r| score_one(r, query)).collect();
    scored.sort_by(|a, b| b.relevance_score.partial_cmp(&a.relevance_score).unwrap_or(Ordering::Equal));
    scored
}

fn score_one(raw: RawResult, query: &str) -> ScoredResult {
    let domain = domain_of(&raw.url);
    let relevance_score = relevance(&raw, query);
    let content_type = content_type(&raw);
    let trust_score = trust_score(&domain);
    let extracted_date = extract_date(&raw);

    ScoredResult {
        title: raw.title,
        url: raw.url,
        display_url: raw.display_url,
        snippet: raw.snippet,
        domain,
        relevance_score,
        content_type,
        trust_score,
        extracted_date,
        source: raw.source,
    }
}

/// Network location of `url`: host plus `:port` when one is given.
///
/// Protocol-relative hrefs (`//host/path`) are read as https. Anything else
/// that does not parse as an absolute URL yields an empty string.
pub fn domain_of(url: &str) -> String {
    let parsed = match url.strip_prefix("//") {
        Some(rest) => url::Url::parse(&format!("https://{rest}")),
        None => url::Url::parse(url),
    };
    let Ok(parsed) = parsed else {
        return String::new();
    };
    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

/// Weighted count of query tokens found in title, snippet and URL.
///
/// Tokens are the whitespace-separated words of the lowercased query, matched
/// as substrings. Hosts containing an authority marker get a small bonus.
/// The result is capped at 1.0.
pub fn relevance(result: &RawResult, query: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let words: Vec<&str> = query_lower.split_whitespace().collect();

    let count = |haystack: &str| {
        let haystack = haystack.to_lowercase();
        words.iter().filter(|w| haystack.contains(**w)).count() as f64
    };

    let mut score = 0.0;
    score += count(&result.title) * TITLE_WEIGHT;
    score += count(&result.snippet) * SNIPPET_WEIGHT;
    score += count(&result.url) * URL_WEIGHT;

    let domain = domain_of(&result.url);
    if contains_any(&domain, AUTHORITY_MARKERS) {
        score += AUTHORITY_BONUS;
    }

    score.min(1.0)
}

/// Classify a hit from URL and title keywords. First matching rule wins.
pub fn content_type(result: &RawResult) -> ContentType {
    let url = result.url.to_lowercase();
    let title = result.title.to_lowercase();

    if contains_any(&url, &["pdf", "scholar", "arxiv", "research", "paper"])
        || contains_any(&title, &["pdf", "scholar", "arxiv", "research", "paper"])
    {
        ContentType::Academic
    } else if contains_any(&url, &["news", "cnn", "bbc", "reuters"]) || title.contains("news") {
        ContentType::News
    } else if contains_any(&url, &["youtube", "vimeo", "video"]) || title.contains("video") {
        ContentType::Video
    } else if contains_any(&url, &["docs", "documentation", "tutorial", "guide"])
        || contains_any(&title, &["docs", "documentation", "tutorial", "guide"])
    {
        ContentType::Documentation
    } else if contains_any(&url, &["reddit", "stackoverflow", "forum"]) || title.contains("stack") {
        ContentType::Discussion
    } else {
        ContentType::General
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Coarse trust tier of a host: 0.9, 0.7, 0.3, or 0.5 when nothing matches.
pub fn trust_score(domain: &str) -> f64 {
    if contains_any(domain, HIGH_TRUST) {
        0.9
    } else if contains_any(domain, MEDIUM_TRUST) {
        0.7
    } else if contains_any(domain, LOW_TRUST) {
        0.3
    } else {
        0.5
    }
}

/// First date-looking substring of title and snippet.
///
/// Patterns are tried in order (`M/D/YYYY`, `YYYY-MM-DD`, `Mon D, YYYY`) and
/// the first pattern with any match decides.
pub fn extract_date(result: &RawResult) -> Option<String> {
    let text = format!("{} {}", result.title, result.snippet);
    DATE_PATTERNS.iter().find_map(|re| re.find(&text).map(|m| m.as_str().to_string()))
}
