//! Web search tool backed by the Tavily search API.

use async_trait::async_trait;
use scout_config::SearchConfig;
use scout_core::error::ToolError;
use scout_core::tool::Tool;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const TOOL_NAME: &str = "web_search";

pub struct WebSearchTool {
    api_url: String,
    api_key: Option<String>,
    max_results: usize,
    client: reqwest::Client,
}

impl WebSearchTool {
    pub fn new(config: &SearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            max_results: config.max_results,
            client,
        }
    }

    fn failed(reason: impl Into<String>) -> ToolError {
        ToolError::ExecutionFailed {
            tool_name: TOOL_NAME.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn signature(&self) -> String {
        "web_search(query: str)".into()
    }

    fn description(&self) -> &str {
        "Search the web for up-to-date information. Returns titles, URLs and snippets."
    }

    async fn execute(&self, query: &str) -> Result<String, ToolError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ToolError::InvalidArguments("Search query is empty".into()));
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Self::failed("TAVILY_API_KEY is not set"))?;

        debug!(query, max_results = self.max_results, "Searching the web");

        let request = SearchRequest {
            api_key,
            query,
            search_depth: "basic",
            max_results: self.max_results,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Search API returned error");
            return Err(Self::failed(format!("search API returned HTTP {status}")));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Self::failed(format!("invalid search response: {e}")))?;

        debug!(results = body.results.len(), "Search complete");
        Ok(format_results(&body.results))
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

/// Render results as `Title/URL/Snippet` blocks, each followed by a blank
/// line. No results renders as the empty string.
pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("Title: {}\nURL: {}\nSnippet: {}\n\n", r.title, r.url, r.content))
        .collect()
}
