//! Fusing several extracted pages into one research summary body.

use sleuth_core::{ExtractedContent, SummaryBody};

use crate::extract::{top_by_frequency, truncate_chars};

/// Overview shown when no source could be extracted.
pub const NO_CONTENT_OVERVIEW: &str = "No content available for summarization.";

const MAX_OVERVIEW_CHARS: usize = 500;
const MAX_COMMON_KEYWORDS: usize = 10;
const MAX_KEY_POINTS: usize = 5;

/// Merge the summaries and keywords of `contents`, in the given order.
pub fn fuse(contents: &[ExtractedContent]) -> SummaryBody {
    if contents.is_empty() {
        return SummaryBody { overview: NO_CONTENT_OVERVIEW.to_string(), ..Default::default() };
    }

    let combined = contents.iter().map(|c| c.summary.as_str()).collect::<Vec<_>>().join(" ");

    let all_keywords = contents.iter().flat_map(|c| c.key_information.keywords.iter());
    let common_keywords = top_by_frequency(all_keywords, MAX_COMMON_KEYWORDS);
    let key_points = common_keywords.iter().take(MAX_KEY_POINTS).cloned().collect();

    SummaryBody {
        overview: truncate_chars(&combined, MAX_OVERVIEW_CHARS),
        key_points,
        common_keywords,
        total_words: contents.iter().map(|c| c.word_count).sum(),
        source_count: contents.len(),
    }
}
