//! Agent System
//!
//! Turns an uploaded document and a query into an investment-analysis narrative.
//!
//! ## Pipeline Overview
//!
//! ```text
//! (query, file_path)
//!      │
//!      ▼
//! ┌──────────────────┐
//! │ Crew (sequential)│  → one task, one agent
//! └──────────────────┘
//!      │
//!      ▼
//! ┌──────────────────┐
//! │ Financial Analyst│  → document reader, then analysis tools,
//! │      Agent       │    then LLM narrative (or plain report)
//! └──────────────────┘
//!      │
//!      ▼
//!  Analysis text
//! ```

pub mod agent;
pub mod crew;
pub mod financial_analyst;
pub mod task;

pub use agent::{Agent, Observation};
pub use crew::{Crew, CrewOutput, Process};
pub use task::{Task, TaskInputs, TaskOutput};

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::Config;
use crate::llm::{adapter_from_config, LLMAdapter};
use crate::tools::ToolRegistry;
use crate::types::AppResult;

/// Produces the analysis text for one uploaded document
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn run(&self, query: &str, file_path: &Path) -> AppResult<String>;
}

/// Runs the financial analyst crew: exactly one task bound to exactly one agent
pub struct CrewOrchestrator {
    registry: ToolRegistry,
    llm: Option<Arc<dyn LLMAdapter>>,
    model: String,
}

impl CrewOrchestrator {
    pub fn new(registry: ToolRegistry, llm: Option<Arc<dyn LLMAdapter>>, model: impl Into<String>) -> Self {
        Self {
            registry,
            llm,
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let registry = ToolRegistry::financial_defaults(config);
        info!(tools = ?registry.names(), "Tool registry ready");
        let llm = adapter_from_config(&config.llm);
        if llm.is_none() {
            info!("No LLM API key configured, analyses will be plain tool reports");
        }

        Self::new(registry, llm, config.llm.model.clone())
    }
}

#[async_trait]
impl Orchestrator for CrewOrchestrator {
    async fn run(&self, query: &str, file_path: &Path) -> AppResult<String> {
        let agent = financial_analyst::financial_analyst(&self.registry, self.llm.clone(), &self.model);
        let task = financial_analyst::analyze_financial_document();
        let crew = Crew::new(vec![agent], vec![task], Process::Sequential);

        let inputs: TaskInputs = [
            ("query".to_string(), query.to_string()),
            ("file_path".to_string(), file_path.to_string_lossy().into_owned()),
        ]
        .into_iter()
        .collect();

        let output = crew.kickoff(&inputs, &self.registry).await?;
        Ok(output.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::EXTRACTION_ERROR_PREFIX;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_unreadable_document_flows_into_analysis() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let orchestrator = CrewOrchestrator::from_config(&Config::default());
        let analysis = orchestrator.run("Summarize risks", &path).await.unwrap();

        assert!(analysis.contains(EXTRACTION_ERROR_PREFIX));
        assert!(analysis.contains("Query: Summarize risks"));
    }
}
