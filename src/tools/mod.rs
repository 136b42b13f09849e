//! Agent Tools
//!
//! Capabilities an agent can call while working on a task:
//!
//! - **Financial Document Reader**: PDF path → document text
//! - **Investment Analysis Tool**: document text → investment observation
//! - **Risk Assessment Tool**: document text → risk observation
//! - **Search Tool**: query → web search summary (only when a Serper key is set)
//!
//! Every capability implements [`Tool`] and is looked up by name through a
//! [`ToolRegistry`], so new analysis logic plugs in without touching the
//! HTTP layer.

pub mod document;
pub mod investment;
pub mod risk;
pub mod search;

pub use document::{read_pdf, ExtractionError, FinancialDocumentTool, EXTRACTION_ERROR_PREFIX};
pub use investment::InvestmentTool;
pub use risk::RiskTool;
pub use search::SearchTool;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::types::AppResult;

/// What a tool expects to receive as its input string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolInput {
    FilePath,
    DocumentText,
    Query,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input(&self) -> ToolInput;
    async fn run(&self, input: &str) -> AppResult<String>;
}

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader, investment and risk tools, plus search when configured
    pub fn financial_defaults(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FinancialDocumentTool));
        registry.register(Arc::new(InvestmentTool));
        registry.register(Arc::new(RiskTool));

        if let Some(search) = SearchTool::from_config(&config.search) {
            registry.register(Arc::new(search));
        }

        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_defaults_without_search_key() {
        let registry = ToolRegistry::financial_defaults(&Config::default());

        assert!(registry.contains(document::TOOL_NAME));
        assert!(registry.contains(investment::TOOL_NAME));
        assert!(registry.contains(risk::TOOL_NAME));
        assert!(!registry.contains(search::TOOL_NAME));
        assert_eq!(registry.names().len(), 3);
    }

    #[test]
    fn test_financial_defaults_with_search_key() {
        let mut config = Config::default();
        config.search.serper_api_key = Some("serper-key".to_string());

        let registry = ToolRegistry::financial_defaults(&config);
        assert!(registry.contains(search::TOOL_NAME));
    }
}
