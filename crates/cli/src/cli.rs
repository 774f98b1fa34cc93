use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sleuth_client::{DEFAULT_MAX_RESULTS, DEFAULT_MAX_SOURCES};
use sleuth_core::ResearchType;

/// Output mode for command results.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    Raw,
}

/// Top-level CLI parser for the `sleuth` binary.
#[derive(Debug, Parser)]
#[command(name = "sleuth", version, about = "Web research from the terminal: search, extract, summarize, bookmark")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Cache directory (overrides SLEUTH_CACHE_DIR and the config file)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search the web with type-specific query enhancement.
    Search {
        query: String,
        /// general, academic, news or technical
        #[arg(short = 't', long = "type", default_value = "general")]
        search_type: ResearchType,
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },
    /// Fetch a page and extract text, summary and key information.
    Extract { url: String },
    /// Research a topic across several sources.
    Summary {
        topic: String,
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_SOURCES)]
        max_sources: usize,
    },
    /// Saved pages.
    Bookmark {
        #[command(subcommand)]
        action: BookmarkCommands,
    },
    /// Content cache maintenance.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum BookmarkCommands {
    /// Save a bookmark.
    Add {
        url: String,
        title: String,
        /// Tag to attach; repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Find bookmarks by title, URL or tag.
    Find {
        /// Case-insensitive substring; omit to list everything.
        #[arg(default_value = "")]
        query: String,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum CacheCommands {
    /// Drop cached searches and pages.
    Purge {
        /// Drop entries at least this many hours old (default: configured max age).
        #[arg(long, conflicts_with = "all")]
        older_than_hours: Option<u32>,
        /// Drop everything.
        #[arg(long)]
        all: bool,
    },
}
