//! Serper Search Tool
//!
//! Supplements document analysis with current web results (market news,
//! company filings, analyst coverage) for the user's query.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Tool, ToolInput};
use crate::config::SearchConfig;
use crate::types::{AppError, AppResult};

pub const TOOL_NAME: &str = "Search Tool";

const MAX_RESULTS: usize = 5;

#[derive(Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganicResult {
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

pub struct SearchTool {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SearchTool {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Configure from settings; `None` when no API key is set
    pub fn from_config(config: &SearchConfig) -> Option<Self> {
        let api_key = config.active_api_key()?;
        Some(Self::new(api_key, config.serper_base_url.clone()))
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<OrganicResult>> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        info!(query, "Searching the web");

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&SerperRequest { q: query })
            .send()
            .await
            .map_err(|e| AppError::Search(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Search(format!("HTTP {}: {}", status, body)));
        }

        let parsed: SerperResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse results: {}", e)))?;

        debug!(results = parsed.organic.len(), "Search results received");

        Ok(parsed.organic.into_iter().take(MAX_RESULTS).collect())
    }

    fn format_results(results: &[OrganicResult]) -> String {
        if results.is_empty() {
            return "No search results found.".to_string();
        }

        results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {} ({})\n   {}", i + 1, r.title, r.link, r.snippet))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Searches the web for market context related to the query."
    }

    fn input(&self) -> ToolInput {
        ToolInput::Query
    }

    async fn run(&self, input: &str) -> AppResult<String> {
        let results = self.search(input).await?;
        Ok(Self::format_results(&results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_key() {
        assert!(SearchTool::from_config(&SearchConfig::default()).is_none());

        let config = SearchConfig {
            serper_api_key: Some("key".to_string()),
            ..SearchConfig::default()
        };
        assert!(SearchTool::from_config(&config).is_some());
    }

    #[tokio::test]
    async fn test_search_formats_top_results() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_header("x-api-key", "serper-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"organic": [
                    {"title": "Tesla Q2 deliveries", "link": "https://example.com/a", "snippet": "Deliveries rose."},
                    {"title": "EV margins", "link": "https://example.com/b", "snippet": "Margins narrowed."}
                ]}"#,
            )
            .create_async()
            .await;

        let tool = SearchTool::new("serper-key", server.url());
        let output = tool.run("tesla deliveries").await.unwrap();

        mock.assert_async().await;
        assert!(output.starts_with("1. Tesla Q2 deliveries (https://example.com/a)"));
        assert!(output.contains("2. EV margins"));
    }

    #[tokio::test]
    async fn test_search_surfaces_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let tool = SearchTool::new("bad-key", server.url());
        let err = tool.run("anything").await.unwrap_err();
        assert!(matches!(err, AppError::Search(msg) if msg.contains("403")));
    }

    #[test]
    fn test_format_empty_results() {
        assert_eq!(SearchTool::format_results(&[]), "No search results found.");
    }
}
