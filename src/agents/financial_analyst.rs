// Financial analyst agent and its document analysis task

use std::sync::Arc;

use super::agent::Agent;
use super::task::Task;
use crate::llm::LLMAdapter;
use crate::tools::{document, investment, risk, search, ToolRegistry};

pub const ROLE: &str = "Senior Financial Analyst";

pub fn financial_analyst(
    registry: &ToolRegistry,
    llm: Option<Arc<dyn LLMAdapter>>,
    model: &str,
) -> Agent {
    let tools = [document::TOOL_NAME, investment::TOOL_NAME, risk::TOOL_NAME, search::TOOL_NAME]
        .into_iter()
        .filter(|name| registry.contains(name))
        .map(str::to_string)
        .collect();

    Agent {
        role: ROLE.to_string(),
        goal: "Provide accurate, evidence-based investment analysis of the financial \
               document in response to the user's query."
            .to_string(),
        backstory: "You have years of experience reading annual reports, earnings \
                    releases and regulatory filings. You ground every statement in the \
                    document, call out uncertainty, and never invent figures."
            .to_string(),
        tools,
        llm,
        model: model.to_string(),
    }
}

pub fn analyze_financial_document() -> Task {
    Task {
        description: "Analyze the financial document at {file_path} to answer the user's \
                      query: {query}\n\
                      Read the document, review the key financial figures and trends, \
                      and assess investment opportunities and risks."
            .to_string(),
        expected_output: "A clear investment analysis addressing the query: a summary of \
                          the document, key financial observations, investment \
                          considerations and notable risks."
            .to_string(),
        agent_role: ROLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_analyst_only_lists_registered_tools() {
        let registry = ToolRegistry::financial_defaults(&Config::default());
        let agent = financial_analyst(&registry, None, "gpt-4o-mini");

        assert_eq!(
            agent.tools,
            vec![
                document::TOOL_NAME.to_string(),
                investment::TOOL_NAME.to_string(),
                risk::TOOL_NAME.to_string(),
            ]
        );
    }

    #[test]
    fn test_task_is_bound_to_analyst() {
        let task = analyze_financial_document();
        assert_eq!(task.agent_role, ROLE);
        assert!(task.description.contains("{query}"));
        assert!(task.description.contains("{file_path}"));
    }
}
