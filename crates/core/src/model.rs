//! Research data model shared by the pipeline and its front ends.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Research category selecting query-enhancement rules.
///
/// Deserializes through [`FromStr`], so unknown names become `General`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResearchType {
    #[default]
    General,
    Academic,
    News,
    Technical,
}

impl ResearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchType::General => "general",
            ResearchType::Academic => "academic",
            ResearchType::News => "news",
            ResearchType::Technical => "technical",
        }
    }
}

impl fmt::Display for ResearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResearchType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_default())
    }
}

impl FromStr for ResearchType {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to `General`, which leaves queries untouched.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "academic" => ResearchType::Academic,
            "news" => ResearchType::News,
            "technical" => ResearchType::Technical,
            _ => ResearchType::General,
        })
    }
}

/// Content classification of a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Academic,
    News,
    Video,
    Documentation,
    Discussion,
    General,
}

/// A search hit as scraped from the results page, before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawResult {
    pub title: String,
    pub url: String,
    pub display_url: String,
    pub snippet: String,
    pub source: String,
}

/// A search hit annotated with relevance, trust and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredResult {
    pub title: String,
    pub url: String,
    pub display_url: String,
    pub snippet: String,
    pub domain: String,
    pub relevance_score: f64,
    pub content_type: ContentType,
    pub trust_score: f64,
    pub extracted_date: Option<String>,
    pub source: String,
}

/// Outcome of an intelligent search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchResult {
    pub query: String,
    pub enhanced_query: String,
    pub search_type: ResearchType,
    pub results: Vec<ScoredResult>,
    pub timestamp: String,
    pub total_results: usize,
    #[serde(default)]
    pub from_cache: bool,
    /// Set when the search backend failed; `results` is then empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_error: Option<String>,
}

/// Numbers, dates and frequent words pulled from page text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyInformation {
    pub numbers: Vec<String>,
    pub dates: Vec<String>,
    /// Ordered by descending frequency.
    pub keywords: Vec<String>,
}

/// A fetched page reduced to text, summary and key information.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedContent {
    pub url: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub key_information: KeyInformation,
    pub word_count: usize,
    pub timestamp: String,
    #[serde(default)]
    pub from_cache: bool,
}

/// Fused view over several extracted sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryBody {
    pub overview: String,
    pub key_points: Vec<String>,
    pub common_keywords: Vec<String>,
    pub total_words: usize,
    pub source_count: usize,
}

/// Multi-source research summary for a topic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResearchSummary {
    pub topic: String,
    pub sources_used: usize,
    pub summary: SummaryBody,
    pub source_urls: Vec<String>,
    pub timestamp: String,
}
