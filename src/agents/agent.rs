//! Agent
//!
//! An agent works a [`Task`] with its tools: it reads the document, collects
//! observations from every analysis tool, and either asks the LLM to write the
//! final narrative or, without an LLM, assembles a plain report itself.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::task::{Task, TaskInputs};
use crate::llm::LLMAdapter;
use crate::tools::{ToolInput, ToolRegistry};
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};

/// Longest document excerpt handed to the LLM, in characters
const MAX_DOCUMENT_CHARS: usize = 12_000;
/// Excerpt length for the report written without an LLM
const REPORT_EXCERPT_CHARS: usize = 1_500;

#[derive(Clone)]
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// Names of the registry tools this agent may call
    pub tools: Vec<String>,
    pub llm: Option<Arc<dyn LLMAdapter>>,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub tool: String,
    pub output: String,
}

impl Agent {
    pub async fn execute_task(
        &self,
        task: &Task,
        inputs: &TaskInputs,
        registry: &ToolRegistry,
        context: Option<&str>,
    ) -> AppResult<String> {
        let description = task.render_description(inputs);
        let query = inputs.get("query").map(String::as_str).unwrap_or_default();
        let file_path = inputs
            .get("file_path")
            .ok_or_else(|| AppError::InvalidRequest("Task inputs are missing file_path".to_string()))?;

        info!(role = %self.role, tools = self.tools.len(), "Agent started task");

        let mut document = String::new();
        let mut observations = Vec::new();

        // Readers first: analysis tools need the document text
        for input_kind in [ToolInput::FilePath, ToolInput::DocumentText, ToolInput::Query] {
            for name in &self.tools {
                let tool = registry
                    .get(name)
                    .ok_or_else(|| AppError::ToolNotFound(name.clone()))?;
                if tool.input() != input_kind {
                    continue;
                }

                match input_kind {
                    ToolInput::FilePath => {
                        let text = tool.run(file_path).await?;
                        if !document.is_empty() {
                            document.push('\n');
                        }
                        document.push_str(&text);
                    }
                    ToolInput::DocumentText => {
                        let output = tool.run(&document).await?;
                        observations.push(Observation { tool: name.clone(), output });
                    }
                    // Query tools are optional context; failures are logged and skipped
                    ToolInput::Query => match tool.run(query).await {
                        Ok(output) => observations.push(Observation { tool: name.clone(), output }),
                        Err(e) => warn!(tool = %name, error = %e, "Tool failed, continuing without it"),
                    },
                }
            }
        }

        let output = match &self.llm {
            Some(llm) => {
                self.write_with_llm(llm.as_ref(), task, &description, &document, &observations, context)
                    .await?
            }
            None => self.write_report(query, &description, &document, &observations),
        };

        info!(role = %self.role, output_len = output.len(), "Agent finished task");

        Ok(output)
    }

    async fn write_with_llm(
        &self,
        llm: &dyn LLMAdapter,
        task: &Task,
        description: &str,
        document: &str,
        observations: &[Observation],
        context: Option<&str>,
    ) -> AppResult<String> {
        let system = format!(
            "You are {}.\n{}\nYour goal: {}",
            self.role, self.backstory, self.goal
        );

        let mut prompt = format!("{}\n\nExpected output: {}\n", description, task.expected_output);
        if let Some(context) = context {
            prompt.push_str(&format!("\nContext from previous tasks:\n{}\n", context));
        }
        prompt.push_str("\nTool observations:\n");
        for observation in observations {
            prompt.push_str(&format!("- {}: {}\n", observation.tool, observation.output));
        }
        prompt.push_str(&format!(
            "\nDocument text:\n{}\n",
            truncate_chars(document, MAX_DOCUMENT_CHARS)
        ));

        let request = LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::system(system), LLMMessage::user(prompt)],
            max_tokens: Some(2048),
            temperature: Some(0.3),
        };

        let response = llm.create_chat_completion(&request).await?;
        match &response.usage {
            Some(usage) => info!(
                model = %self.model,
                finish_reason = %response.finish_reason,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "LLM analysis received"
            ),
            None => debug!(model = %self.model, finish_reason = %response.finish_reason, "LLM analysis received"),
        }
        if response.content.trim().is_empty() {
            return Err(AppError::LLMApi("Model returned an empty analysis".to_string()));
        }

        Ok(response.content)
    }

    fn write_report(
        &self,
        query: &str,
        description: &str,
        document: &str,
        observations: &[Observation],
    ) -> String {
        let mut report = format!("# {} report\n\nQuery: {}\n\n## Task\n{}\n", self.role, query, description);

        report.push_str("\n## Observations\n");
        if observations.is_empty() {
            report.push_str("- No analysis tools were available.\n");
        }
        for observation in observations {
            report.push_str(&format!("- {}: {}\n", observation.tool, observation.output));
        }

        report.push_str("\n## Document excerpt\n");
        if document.trim().is_empty() {
            report.push_str("(no text could be extracted)\n");
        } else {
            report.push_str(truncate_chars(document, REPORT_EXCERPT_CHARS));
            report.push('\n');
        }

        report
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
