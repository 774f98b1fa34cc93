//! Bookmark MCP tools.
//!
//! Bookmarks live next to the content cache and are persisted on every save.

pub mod save;
pub mod search;

pub use save::{BookmarkSaveParams, save_impl};
pub use search::{BookmarkSearchOutput, BookmarkSearchParams, search_impl};
