//! File-backed cache for search results, extracted pages and bookmarks.
//!
//! This module provides a persistent, fingerprint-keyed cache stored as JSON.
//! It supports:
//!
//! - SHA-256 fingerprints for cache keys and bookmark ids
//! - Insertion-ordered truncation on persist
//! - Age-based freshness checks and purges
//! - An append-only bookmark list

pub mod bookmarks;
pub mod hash;
pub mod store;

pub use crate::Error;

pub use bookmarks::Bookmark;
pub use store::{CacheEntry, CachePayload, CacheStore, DEFAULT_MAX_AGE_HOURS, DEFAULT_MAX_ENTRIES};
