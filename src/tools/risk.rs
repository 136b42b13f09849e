use async_trait::async_trait;

use super::{Tool, ToolInput};
use crate::types::AppResult;

pub const TOOL_NAME: &str = "Risk Assessment Tool";

pub const PENDING_MESSAGE: &str = "Risk assessment logic pending implementation.";

pub struct RiskTool;

#[async_trait]
impl Tool for RiskTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Analyzes financial risks from document data."
    }

    fn input(&self) -> ToolInput {
        ToolInput::DocumentText
    }

    async fn run(&self, _input: &str) -> AppResult<String> {
        Ok(PENDING_MESSAGE.to_string())
    }
}
