use std::fmt;

use tracing::info;

use super::agent::Agent;
use super::task::{Task, TaskInputs, TaskOutput};
use crate::tools::ToolRegistry;
use crate::types::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Process {
    /// Tasks run one after another; each sees the previous task's output
    Sequential,
}

pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    process: Process,
}

#[derive(Debug, Clone)]
pub struct CrewOutput {
    pub raw: String,
    pub tasks_output: Vec<TaskOutput>,
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Crew {
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>, process: Process) -> Self {
        Self { agents, tasks, process }
    }

    pub async fn kickoff(&self, inputs: &TaskInputs, registry: &ToolRegistry) -> AppResult<CrewOutput> {
        if self.tasks.is_empty() {
            return Err(AppError::Internal("Crew has no tasks to run".to_string()));
        }

        info!(
            agents = self.agents.len(),
            tasks = self.tasks.len(),
            process = ?self.process,
            "Crew kickoff"
        );

        let mut tasks_output: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());
        match self.process {
            Process::Sequential => {
                for task in &self.tasks {
                    let agent = self.agent_for(task)?;
                    let context = tasks_output.last().map(|previous| previous.raw.as_str());
                    let raw = agent.execute_task(task, inputs, registry, context).await?;

                    tasks_output.push(TaskOutput {
                        description: task.render_description(inputs),
                        agent_role: agent.role.clone(),
                        raw,
                    });
                }
            }
        }

        let raw = tasks_output
            .last()
            .map(|output| output.raw.clone())
            .unwrap_or_default();

        Ok(CrewOutput { raw, tasks_output })
    }

    fn agent_for(&self, task: &Task) -> AppResult<&Agent> {
        self.agents
            .iter()
            .find(|agent| agent.role == task.agent_role)
            .ok_or_else(|| {
                AppError::Internal(format!("No agent with role '{}' in crew", task.agent_role))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolInput, Tool};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoReader;

    #[async_trait]
    impl Tool for EchoReader {
        fn name(&self) -> &str {
            "Echo Reader"
        }
        fn description(&self) -> &str {
            "Returns the path it was given"
        }
        fn input(&self) -> ToolInput {
            ToolInput::FilePath
        }
        async fn run(&self, input: &str) -> AppResult<String> {
            Ok(format!("contents of {}", input))
        }
    }

    fn agent(role: &str) -> Agent {
        Agent {
            role: role.to_string(),
            goal: "goal".to_string(),
            backstory: "backstory".to_string(),
            tools: vec!["Echo Reader".to_string()],
            llm: None,
            model: "none".to_string(),
        }
    }

    fn task(role: &str, description: &str) -> Task {
        Task {
            description: description.to_string(),
            expected_output: "text".to_string(),
            agent_role: role.to_string(),
        }
    }

    fn setup() -> (ToolRegistry, TaskInputs) {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoReader));
        let inputs = [
            ("query".to_string(), "q".to_string()),
            ("file_path".to_string(), "doc.pdf".to_string()),
        ]
        .into_iter()
        .collect();
        (registry, inputs)
    }

    #[tokio::test]
    async fn test_sequential_runs_every_task_in_order() {
        let (registry, inputs) = setup();
        let crew = Crew::new(
            vec![agent("Reader"), agent("Writer")],
            vec![task("Reader", "first {query}"), task("Writer", "second {query}")],
            Process::Sequential,
        );

        let output = crew.kickoff(&inputs, &registry).await.unwrap();

        assert_eq!(output.tasks_output.len(), 2);
        assert_eq!(output.tasks_output[0].agent_role, "Reader");
        assert_eq!(output.tasks_output[1].description, "second q");
        assert_eq!(output.raw, output.tasks_output[1].raw);
        assert_eq!(output.to_string(), output.raw);
        assert!(output.raw.contains("contents of doc.pdf"));
    }

    #[tokio::test]
    async fn test_task_without_matching_agent() {
        let (registry, inputs) = setup();
        let crew = Crew::new(vec![agent("Reader")], vec![task("Auditor", "x")], Process::Sequential);

        assert!(matches!(
            crew.kickoff(&inputs, &registry).await,
            Err(AppError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_crew() {
        let (registry, inputs) = setup();
        let crew = Crew::new(vec![agent("Reader")], vec![], Process::Sequential);

        assert!(crew.kickoff(&inputs, &registry).await.is_err());
    }
}
