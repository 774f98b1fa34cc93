//! Command handlers. Each one runs against the assistant and prints JSON.

use anyhow::Result;
use serde::Serialize;
use sleuth_client::ResearchAssistant;

use crate::cli::{BookmarkCommands, CacheCommands, Commands, OutputFormat};

#[derive(Debug, Serialize)]
struct PurgeReport {
    deleted: usize,
    remaining: usize,
}

pub async fn dispatch(command: Commands, assistant: &mut ResearchAssistant, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Search { query, search_type, max_results } => {
            let result = assistant.intelligent_search(&query, search_type, max_results).await;
            if let Some(error) = &result.backend_error {
                tracing::warn!("search backend failed: {}", error);
            }
            output(&result, format)
        }
        Commands::Extract { url } => {
            let content = assistant.extract_content(&url).await?;
            output(&content, format)
        }
        Commands::Summary { topic, max_sources } => {
            let summary = assistant.get_research_summary(&topic, max_sources).await;
            output(&summary, format)
        }
        Commands::Bookmark { action } => bookmark(action, assistant, format),
        Commands::Cache { action } => cache(action, assistant, format),
    }
}

fn bookmark(action: BookmarkCommands, assistant: &mut ResearchAssistant, format: OutputFormat) -> Result<()> {
    match action {
        BookmarkCommands::Add { url, title, tags } => {
            let bookmark = assistant.save_bookmark(&url, &title, tags);
            output(&bookmark, format)
        }
        BookmarkCommands::Find { query } => output(&assistant.search_bookmarks(&query), format),
    }
}

fn cache(action: CacheCommands, assistant: &mut ResearchAssistant, format: OutputFormat) -> Result<()> {
    match action {
        CacheCommands::Purge { older_than_hours, all } => {
            let max_age_hours = older_than_hours.unwrap_or(assistant.max_age_hours());
            let store = assistant.store_mut();
            let deleted = if all { store.clear() } else { store.purge_expired(max_age_hours) };
            store.persist();
            output(&PurgeReport { deleted, remaining: store.len() }, format)
        }
    }
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

fn output<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_formats() {
        let report = PurgeReport { deleted: 2, remaining: 0 };
        assert_eq!(render(&report, OutputFormat::Raw).unwrap(), r#"{"deleted":2,"remaining":0}"#);
        assert_eq!(render(&report, OutputFormat::Json).unwrap(), "{\n  \"deleted\": 2,\n  \"remaining\": 0\n}");
    }
}
