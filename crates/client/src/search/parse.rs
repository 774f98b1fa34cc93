//! Pattern-based scraping of DuckDuckGo HTML result pages.
//!
//! The HTML endpoint renders each hit as a `result__a` title anchor followed
//! by a snippet and a `result__url` anchor. Everything here is regex over the
//! raw markup; no DOM is built.

use regex::Regex;
use sleuth_core::RawResult;
use std::sync::LazyLock;

use crate::extract::text::truncate_chars;

/// Source label attached to every scraped hit.
pub const SOURCE_NAME: &str = "DuckDuckGo";

/// Snippets longer than this are cut and suffixed with `...`.
pub const MAX_SNIPPET_CHARS: usize = 300;

static RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]*)"[^>]*>([^<]*)</a.*?<a[^>]*class="result__url"[^>]*>([^<]*)</a>"#,
    )
    .expect("result pattern compiles")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));

/// Turns a results page into raw hits.
pub trait ResultParser: Send + Sync {
    /// Parse at most `max_results` hits, in page order.
    fn parse(&self, html: &str, max_results: usize) -> Vec<RawResult>;
}

/// Regex scraper for the DuckDuckGo HTML layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexResultParser;

impl ResultParser for RegexResultParser {
    fn parse(&self, html: &str, max_results: usize) -> Vec<RawResult> {
        RESULT_RE
            .captures_iter(html)
            .take(max_results)
            .map(|caps| {
                let href = &caps[1];
                let snippet = snippet_for(html, href);
                RawResult {
                    title: decode_entities(strip_tags(&caps[2]).trim()),
                    url: resolve_redirect(href),
                    display_url: decode_entities(strip_tags(&caps[3]).trim()),
                    snippet,
                    source: SOURCE_NAME.to_string(),
                }
            })
            .collect()
    }
}

/// Text between the hit's title anchor and its `result__url` anchor.
///
/// Looked up by the raw `href` as it appears in the page. Empty when the
/// layout does not match.
fn snippet_for(html: &str, href: &str) -> String {
    let pattern = format!(r#"(?s)<a[^>]*href="{}"[^>]*>.*?</a>(.*?)<a[^>]*class="result__url""#, regex::escape(href));
    let Ok(re) = Regex::new(&pattern) else {
        return String::new();
    };
    let Some(caps) = re.captures(html) else {
        return String::new();
    };

    let text = decode_entities(strip_tags(&caps[1]).trim());
    truncate_chars(&text, MAX_SNIPPET_CHARS)
}

/// Remove anything that looks like a markup tag.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Decode the handful of entities the results page actually emits.
pub fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Unwrap DuckDuckGo's `/l/?uddg=` click-tracking links to the target URL.
///
/// Any other href is returned unchanged.
pub fn resolve_redirect(href: &str) -> String {
    let unescaped = href.replace("&amp;", "&");
    let absolute = if unescaped.starts_with("//") {
        format!("https:{unescaped}")
    } else if unescaped.starts_with("/l/") {
        format!("https://duckduckgo.com{unescaped}")
    } else {
        return href.to_string();
    };

    let Ok(parsed) = url::Url::parse(&absolute) else {
        return href.to_string();
    };
    if !parsed.path().starts_with("/l/") {
        return href.to_string();
    }

    parsed
        .query_pairs()
        .find(|(k, _)| k == "uddg")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_else(|| href.to_string())
}
