//! Query enhancement per research type.

use sleuth_core::ResearchType;

/// Modifier words and preferred sources for one research type.
#[derive(Debug, Clone, Copy)]
pub struct ResearchTemplate {
    pub sources: &'static [&'static str],
    pub query_modifiers: &'static [&'static str],
}

const ACADEMIC: ResearchTemplate = ResearchTemplate {
    sources: &["scholar.google.com", "arxiv.org", "researchgate.net"],
    query_modifiers: &["pdf", "research", "study", "paper"],
};

const NEWS: ResearchTemplate = ResearchTemplate {
    sources: &["news.google.com", "bbc.com", "cnn.com", "reuters.com"],
    query_modifiers: &["news", "latest", "breaking", "update"],
};

const TECHNICAL: ResearchTemplate = ResearchTemplate {
    sources: &["stackoverflow.com", "github.com", "documentation", "tutorial"],
    query_modifiers: &["guide", "how to", "example", "documentation"],
};

/// Template for `search_type`, if it has one.
pub fn template(search_type: ResearchType) -> Option<&'static ResearchTemplate> {
    match search_type {
        ResearchType::Academic => Some(&ACADEMIC),
        ResearchType::News => Some(&NEWS),
        ResearchType::Technical => Some(&TECHNICAL),
        ResearchType::General => None,
    }
}

/// Rewrite `query` for `search_type`.
///
/// Appends the type's first modifier unless any modifier already occurs in
/// the query (case-insensitive substring). Academic and technical searches
/// additionally get a `site:` restriction to the first preferred source,
/// whether or not a modifier was added. General queries pass through.
pub fn enhance(query: &str, search_type: ResearchType) -> String {
    let Some(template) = template(search_type) else {
        return query.to_string();
    };

    let mut enhanced = query.to_string();
    let query_lower = query.to_lowercase();

    let has_modifier = template.query_modifiers.iter().any(|m| query_lower.contains(m));
    if !has_modifier && let Some(first) = template.query_modifiers.first() {
        enhanced = format!("{enhanced} {first}");
    }

    if matches!(search_type, ResearchType::Academic | ResearchType::Technical)
        && let Some(site) = template.sources.first()
    {
        enhanced.push_str(&format!(" site:{site}"));
    }

    enhanced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_adds_modifier_and_site() {
        assert_eq!(
            enhance("machine learning", ResearchType::Academic),
            "machine learning pdf site:scholar.google.com"
        );
    }

    #[test]
    fn test_existing_modifier_still_gets_site() {
        assert_eq!(
            enhance("research paper pdf", ResearchType::Academic),
            "research paper pdf site:scholar.google.com"
        );
    }

    #[test]
    fn test_modifier_match_is_case_insensitive_substring() {
        // "Studying" contains "study".
        assert_eq!(enhance("Studying bees", ResearchType::Academic), "Studying bees site:scholar.google.com");
    }

    #[test]
    fn test_news_gets_modifier_but_no_site() {
        assert_eq!(enhance("election", ResearchType::News), "election news");
        assert_eq!(enhance("latest election", ResearchType::News), "latest election");
    }

    #[test]
    fn test_technical() {
        assert_eq!(enhance("tokio select", ResearchType::Technical), "tokio select guide site:stackoverflow.com");
        assert_eq!(
            enhance("How to use tokio select", ResearchType::Technical),
            "How to use tokio select site:stackoverflow.com"
        );
    }

    #[test]
    fn test_general_passes_through() {
        assert_eq!(enhance("anything at all", ResearchType::General), "anything at all");
    }

    #[test]
    fn test_enhance_is_deterministic() {
        let a = enhance("rust", ResearchType::Academic);
        let b = enhance("rust", ResearchType::Academic);
        assert_eq!(a, b);
    }
}
