//! Markup stripping and title lookup.

use regex::Regex;
use std::sync::LazyLock;

/// Main content is capped at this many characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Title used when the page has no `<title>` element.
pub const NO_TITLE: &str = "No title found";

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("script pattern compiles"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("style pattern compiles"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern compiles"));
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]*)</title>").expect("title pattern compiles"));

/// Visible text of `html`, whitespace-collapsed and capped.
///
/// Script and style blocks are dropped with their contents, every other tag
/// becomes a single space.
pub fn main_content(html: &str) -> String {
    let text = SCRIPT_RE.replace_all(html, "");
    let text = STYLE_RE.replace_all(&text, "");
    let text = TAG_RE.replace_all(&text, " ");
    let text = SPACE_RE.replace_all(&text, " ");
    text.trim().chars().take(MAX_CONTENT_CHARS).collect()
}

/// Trimmed text of the first `<title>` element, or [`NO_TITLE`].
pub fn title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// First `max` characters of `text`, with `...` appended when anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_content_drops_script_and_style() {
        let html = r#"<html><head><STYLE type="text/css">body { color: red; }</STYLE>
<script>
  var secret = "hidden";
</script></head>
<body><h1>Hello</h1><p>World   and
more</p></body></html>"#;
        assert_eq!(main_content(html), "Hello World and more");
    }

    #[test]
    fn test_main_content_caps_length() {
        let html = format!("<p>{}</p>", "a".repeat(5000));
        assert_eq!(main_content(&html).chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn test_main_content_plain_text() {
        assert_eq!(main_content("  just text  "), "just text");
        assert_eq!(main_content(""), "");
    }

    #[test]
    fn test_title() {
        assert_eq!(title("<html><TITLE lang=\"en\">  Rust Book </TITLE></html>"), "Rust Book");
        assert_eq!(title("<html><body>untitled</body></html>"), NO_TITLE);
        assert_eq!(title("<title></title>"), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 10), "héllo");
        assert_eq!(truncate_chars("héllo", 5), "héllo");
        assert_eq!(truncate_chars("héllo", 2), "hé...");
    }
}
