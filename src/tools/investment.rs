use async_trait::async_trait;

use super::{Tool, ToolInput};
use crate::types::AppResult;

pub const TOOL_NAME: &str = "Investment Analysis Tool";

/// Placeholder investment analysis: normalizes spacing and reports the size
/// of what it was given.
pub struct InvestmentTool;

impl InvestmentTool {
    pub fn analyze(financial_document_data: &str) -> String {
        // Single pass: "    " becomes "  ", not " "
        let processed_data = financial_document_data.replace("  ", " ");

        format!(
            "Processed data length: {} characters",
            processed_data.chars().count()
        )
    }
}

#[async_trait]
impl Tool for InvestmentTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Analyzes financial document data and provides investment insights."
    }

    fn input(&self) -> ToolInput {
        ToolInput::DocumentText
    }

    async fn run(&self, input: &str) -> AppResult<String> {
        Ok(Self::analyze(input))
    }
}
