//! Simulated web search.
//!
//! Results are canned and derived only from the query, so callers get
//! stable output without network access.

use crate::ToolError;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of canned results the search tool can return.
const MAX_RESULTS: usize = 3;

/// Search result returned by the simulated provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Result snippet.
    pub snippet: String,
}

/// Detailed page returned by [`SearchTool::fetch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebPage {
    pub url: String,
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub fetched_at: DateTime<Utc>,
}

/// Simulated search provider with optional artificial latency.
#[derive(Debug, Clone, Default)]
pub struct SearchTool {
    latency: Duration,
}

impl SearchTool {
    /// Create a search tool that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a search tool that sleeps `latency` before each answer.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Search for `query`, returning at most `limit` results (never more than three).
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, ToolError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ToolError::InvalidArguments(
                "query cannot be empty".to_string(),
            ));
        }
        info!("web search (query_len={}, limit={})", query.len(), limit);
        self.simulate_latency().await;

        let slug = query.replace(' ', "-");
        let snippets = [
            format!(
                "This is a sample search result for {query}. It contains relevant information about the topic."
            ),
            format!("Another search result for {query} with additional details and context."),
            format!("Further information about {query} from a reputable source."),
        ];
        let results = snippets
            .into_iter()
            .enumerate()
            .take(limit.min(MAX_RESULTS))
            .map(|(idx, snippet)| SearchResult {
                title: format!("Result {} for {query}", idx + 1),
                url: format!("https://example.com/result{}-{slug}", idx + 1),
                snippet,
            })
            .collect::<Vec<_>>();
        debug!("web search returned {} results", results.len());
        Ok(results)
    }

    /// Fetch the detailed content of a result URL.
    pub async fn fetch(&self, url: &str) -> Result<WebPage, ToolError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ToolError::InvalidArguments(
                "url cannot be empty".to_string(),
            ));
        }
        info!("web fetch (url_len={})", url.len());
        self.simulate_latency().await;

        let content = format!(
            "This is the detailed content fetched from {url}. A live provider would return the full text of the page."
        );
        Ok(WebPage {
            url: url.to_string(),
            title: format!("Detailed Page Content for {url}"),
            word_count: content.split_whitespace().count(),
            content,
            fetched_at: Utc::now(),
        })
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
