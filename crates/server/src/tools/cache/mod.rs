//! Cache-related MCP tools.
//!
//! This module provides tools for maintaining the JSON content cache.

pub mod purge;

pub use purge::{CachePurgeOutput, CachePurgeParams, purge_impl};
