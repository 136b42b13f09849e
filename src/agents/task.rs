use std::collections::HashMap;

/// Inputs a crew is kicked off with, interpolated into task descriptions
pub type TaskInputs = HashMap<String, String>;

/// A unit of work bound to the agent with the matching role
#[derive(Debug, Clone)]
pub struct Task {
    pub description: String,
    pub expected_output: String,
    pub agent_role: String,
}

impl Task {
    /// Description with every `{key}` placeholder replaced from `inputs`.
    ///
    /// The template is scanned once, left to right, so substituted values are
    /// never expanded again. Unknown placeholders are left as-is.
    pub fn render_description(&self, inputs: &TaskInputs) -> String {
        let mut rendered = String::with_capacity(self.description.len());
        let mut rest = self.description.as_str();

        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                rest = &rest[open..];
                break;
            };

            match inputs.get(&after[..close]) {
                Some(value) => {
                    rendered.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    rendered.push('{');
                    rest = after;
                }
            }
        }

        rendered.push_str(rest);
        rendered
    }
}

#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub description: String,
    pub agent_role: String,
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_description() {
        let task = Task {
            description: "Answer {query} using {file_path}. Keep {unknown}.".to_string(),
            expected_output: String::new(),
            agent_role: "Analyst".to_string(),
        };
        let inputs: TaskInputs = [
            ("query".to_string(), "Summarize risks".to_string()),
            ("file_path".to_string(), "data/doc.pdf".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            task.render_description(&inputs),
            "Answer Summarize risks using data/doc.pdf. Keep {unknown}."
        );
    }

    #[test]
    fn test_render_does_not_expand_substituted_values() {
        let task = Task {
            description: "Q={query} P={file_path}".to_string(),
            expected_output: String::new(),
            agent_role: "Analyst".to_string(),
        };
        let inputs: TaskInputs = [
            ("query".to_string(), "{file_path}".to_string()),
            ("file_path".to_string(), "doc.pdf".to_string()),
        ]
        .into_iter()
        .collect();

        for _ in 0..50 {
            assert_eq!(task.render_description(&inputs), "Q={file_path} P=doc.pdf");
        }
    }

    #[test]
    fn test_render_keeps_stray_braces() {
        let task = Task {
            description: "{{query}} and {unclosed".to_string(),
            expected_output: String::new(),
            agent_role: "Analyst".to_string(),
        };
        let inputs: TaskInputs = [("query".to_string(), "risks".to_string())].into_iter().collect();

        assert_eq!(task.render_description(&inputs), "{risks} and {unclosed");
    }
}
