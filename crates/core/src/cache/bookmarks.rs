//! Bookmark list stored alongside the content cache.

use std::collections::BTreeSet;

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::hash::fingerprint;
use super::store::CacheStore;

/// A saved page.
///
/// The id is the URL fingerprint, so saving the same URL twice produces two
/// bookmarks sharing one id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub timestamp: String,
    pub id: String,
}

impl Bookmark {
    pub fn new(url: &str, title: &str, tags: impl IntoIterator<Item = String>) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            tags: tags.into_iter().collect(),
            timestamp: Utc::now().to_rfc3339(),
            id: fingerprint(url),
        }
    }

    /// Case-insensitive substring match on title, URL or any tag.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.url.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }
}

impl CacheStore {
    /// Append a bookmark and persist both partitions.
    pub fn add_bookmark(&mut self, bookmark: Bookmark) {
        self.bookmarks.push(bookmark);
        self.persist();
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Bookmarks matching `query`, in insertion order.
    pub fn search_bookmarks(&self, query: &str) -> Vec<Bookmark> {
        self.bookmarks.iter().filter(|b| b.matches(query)).cloned().collect()
    }
}
