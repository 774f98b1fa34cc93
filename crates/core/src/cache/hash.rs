//! Fingerprints used as cache keys and bookmark ids.

use sha2::{Digest, Sha256};

use crate::model::ResearchType;

/// Hex-encoded SHA-256 of `input`.
pub fn fingerprint(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Cache key for a search: enhanced query, research type and result budget.
pub fn search_key(enhanced_query: &str, search_type: ResearchType, max_results: usize) -> String {
    fingerprint(&format!("{enhanced_query}_{search_type}_{max_results}"))
}

/// Cache key for an extracted page.
pub fn content_key(url: &str) -> String {
    fingerprint(url)
}
