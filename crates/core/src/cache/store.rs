//! JSON-file cache store for search results and extracted pages.
//!
//! Entries live in memory in insertion order and are written to two
//! partitions in the cache directory:
//!
//! - `content_cache.json`: array of [`CacheEntry`], oldest first
//! - `bookmarks.json`: array of [`Bookmark`]
//!
//! Both files are rewritten in full on every [`CacheStore::persist`]. The
//! content cache is truncated to its newest `max_entries` insertions right
//! before writing; between persists it may grow without bound. Re-putting an
//! existing key replaces the payload but keeps the original position, so
//! eviction order is insertion order rather than access recency.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use super::bookmarks::Bookmark;
use crate::Error;
use crate::model::{ExtractedContent, SearchResult};

pub const CONTENT_CACHE_FILE: &str = "content_cache.json";
pub const BOOKMARKS_FILE: &str = "bookmarks.json";

/// Default number of content entries kept on persist.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default freshness window for cached entries.
pub const DEFAULT_MAX_AGE_HOURS: u32 = 24;

/// Anything the content cache can hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CachePayload {
    Search(SearchResult),
    Content(ExtractedContent),
}

impl CachePayload {
    pub fn timestamp(&self) -> &str {
        match self {
            CachePayload::Search(s) => &s.timestamp,
            CachePayload::Content(c) => &c.timestamp,
        }
    }
}

/// A keyed cache record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    /// Creation time of the payload (RFC 3339).
    #[serde(default)]
    pub timestamp: Option<String>,
    pub payload: CachePayload,
}

impl CacheEntry {
    pub fn is_fresh(&self, max_age_hours: u32) -> bool {
        CacheStore::is_valid(self.timestamp.as_deref(), max_age_hours)
    }
}

/// Insertion-ordered content cache plus bookmark list.
///
/// The store takes `&mut self` for every mutation and has no internal lock;
/// hosts sharing it between tasks must serialize access themselves.
#[derive(Debug)]
pub struct CacheStore {
    dir: Option<PathBuf>,
    max_entries: usize,
    entries: Vec<CacheEntry>,
    index: HashMap<String, usize>,
    pub(super) bookmarks: Vec<Bookmark>,
}

impl CacheStore {
    /// Open a store backed by `dir`, creating the directory if needed.
    ///
    /// Missing partitions start empty. Unreadable or corrupt partitions are
    /// logged and also start empty, so a damaged cache never blocks research.
    pub fn open(dir: impl AsRef<Path>, max_entries: usize) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| Error::Cache(format!("cannot create {}: {e}", dir.display())))?;

        let mut store = Self::empty(Some(dir.clone()), max_entries);

        for entry in load_partition::<CacheEntry>(&dir.join(CONTENT_CACHE_FILE)) {
            store.insert_entry(entry);
        }
        store.bookmarks = load_partition(&dir.join(BOOKMARKS_FILE));

        tracing::debug!(
            dir = %dir.display(),
            entries = store.entries.len(),
            bookmarks = store.bookmarks.len(),
            "opened cache store"
        );

        Ok(store)
    }

    /// Open a store with no backing directory; `persist` only truncates.
    pub fn open_in_memory(max_entries: usize) -> Self {
        Self::empty(None, max_entries)
    }

    fn empty(dir: Option<PathBuf>, max_entries: usize) -> Self {
        Self { dir, max_entries, entries: Vec::new(), index: HashMap::new(), bookmarks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Entry for `key` if it exists and is younger than `max_age_hours`.
    pub fn get_fresh(&self, key: &str, max_age_hours: u32) -> Option<&CacheEntry> {
        self.get(key).filter(|entry| entry.is_fresh(max_age_hours))
    }

    /// Insert or replace `key`. The entry timestamp is the payload's own.
    pub fn put(&mut self, key: impl Into<String>, payload: CachePayload) {
        let timestamp = Some(payload.timestamp().to_string());
        self.insert_entry(CacheEntry { key: key.into(), timestamp, payload });
    }

    fn insert_entry(&mut self, entry: CacheEntry) {
        match self.index.get(&entry.key) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Check whether `timestamp` is younger than `max_age_hours`.
    ///
    /// Missing or unparsable timestamps are never valid.
    pub fn is_valid(timestamp: Option<&str>, max_age_hours: u32) -> bool {
        Self::is_valid_at(timestamp, max_age_hours, Utc::now())
    }

    pub fn is_valid_at(timestamp: Option<&str>, max_age_hours: u32, now: DateTime<Utc>) -> bool {
        let Some(created) = timestamp.and_then(parse_timestamp) else {
            return false;
        };
        (now - created).num_seconds() < i64::from(max_age_hours) * 3600
    }

    /// Drop every content entry older than `max_age_hours`.
    ///
    /// Returns the number of removed entries.
    pub fn purge_expired(&mut self, max_age_hours: u32) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.is_fresh(max_age_hours));
        self.rebuild_index();
        before - self.entries.len()
    }

    /// Drop every content entry. Bookmarks are kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.index.clear();
        removed
    }

    /// Truncate to the newest `max_entries` insertions and write both partitions.
    ///
    /// Write failures are logged and swallowed; in-memory state is kept.
    pub fn persist(&mut self) {
        self.truncate();

        if let Err(e) = self.write_partitions() {
            tracing::warn!("failed to persist cache: {}", e);
        }
    }

    fn truncate(&mut self) {
        if self.entries.len() <= self.max_entries {
            return;
        }
        let excess = self.entries.len() - self.max_entries;
        self.entries.drain(..excess);
        self.rebuild_index();
        tracing::debug!(evicted = excess, "truncated content cache");
    }

    fn rebuild_index(&mut self) {
        self.index = self.entries.iter().enumerate().map(|(i, e)| (e.key.clone(), i)).collect();
    }

    fn write_partitions(&self) -> Result<(), Error> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        write_partition(&dir.join(CONTENT_CACHE_FILE), &self.entries)?;
        write_partition(&dir.join(BOOKMARKS_FILE), &self.bookmarks)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn load_partition<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!("failed to read {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!("ignoring corrupt cache partition {}: {}", path.display(), e);
        Vec::new()
    })
}

fn write_partition<T: Serialize>(path: &Path, items: &[T]) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(items).map_err(|e| Error::Cache(e.to_string()))?;
    fs::write(path, json).map_err(|e| Error::Cache(format!("{}: {e}", path.display())))
}
