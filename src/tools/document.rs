//! Financial document reader backed by lopdf

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lopdf::Document;
use tracing::{debug, warn};

use super::{Tool, ToolInput};
use crate::types::AppResult;

pub const TOOL_NAME: &str = "Financial Document Reader";

/// Prefix of the text the reader tool returns when a PDF cannot be read
pub const EXTRACTION_ERROR_PREFIX: &str = "Error reading PDF";

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Pdf(#[from] lopdf::Error),

    #[error("extraction task failed: {0}")]
    Join(String),
}

/// Load a PDF and return the text of every page, in page order.
///
/// Double newlines inside a page collapse to single ones and pages are joined
/// with a newline.
pub fn read_pdf(path: &Path) -> Result<String, ExtractionError> {
    let document = Document::load(path)?;
    let pages = document.get_pages();

    let mut texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = document.extract_text(&[*page_number])?;
        texts.push(normalize_page_text(&text));
    }

    debug!(path = %path.display(), pages = texts.len(), "PDF text extracted");

    Ok(texts.join("\n"))
}

/// Run [`read_pdf`] on the blocking pool
pub async fn read_pdf_blocking(path: PathBuf) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || read_pdf(&path))
        .await
        .map_err(|e| ExtractionError::Join(e.to_string()))?
}

fn normalize_page_text(text: &str) -> String {
    text.replace("\n\n", "\n")
}

/// Reads a financial PDF and returns cleaned text.
///
/// Extraction failures do not fail the tool: they come back as text starting
/// with [`EXTRACTION_ERROR_PREFIX`], and downstream analysis sees that text.
pub struct FinancialDocumentTool;

#[async_trait]
impl Tool for FinancialDocumentTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Reads a financial PDF document and returns cleaned text."
    }

    fn input(&self) -> ToolInput {
        ToolInput::FilePath
    }

    async fn run(&self, input: &str) -> AppResult<String> {
        match read_pdf_blocking(PathBuf::from(input)).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(path = input, error = %e, "Failed to read PDF");
                Ok(format!("{}: {}", EXTRACTION_ERROR_PREFIX, e))
            }
        }
    }
}
