//! `POST /analyze` - upload a financial PDF and receive an investment analysis

use std::path::{Path, PathBuf};

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::db::DatabaseOperations;
use crate::models::{AnalyzeResponse, AppState, NewAnalysisRecord};
use crate::types::{ApiError, AppResult};

pub const DEFAULT_QUERY: &str = "Analyze this financial document for investment insights";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_financial_document))
        .with_state(state)
}

struct UploadedDocument {
    file_name: String,
    bytes: Bytes,
}

#[derive(Default)]
struct AnalysisForm {
    file: Option<UploadedDocument>,
    query: Option<String>,
}

impl AnalysisForm {
    async fn from_multipart(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = AnalysisForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("file") => {
                    let file_name = field
                        .file_name()
                        .map(str::to_owned)
                        .ok_or_else(|| ApiError::unprocessable("Field file: expected an uploaded file"))?;
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                    form.file = Some(UploadedDocument { file_name, bytes });
                }
                Some("query") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                    form.query = Some(text);
                }
                other => debug!(field = ?other, "Ignoring unexpected form field"),
            }
        }

        Ok(form)
    }
}

/// The submitted query, or the default prompt when it is missing or blank
fn effective_query(submitted: Option<String>) -> String {
    match submitted {
        Some(query) if !query.trim().is_empty() => query,
        _ => DEFAULT_QUERY.to_string(),
    }
}

fn temporary_document_path(upload_dir: &Path) -> PathBuf {
    upload_dir.join(format!("financial_document_{}.pdf", Uuid::new_v4()))
}

async fn analyze_financial_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut multipart =
        multipart.map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;
    let form = AnalysisForm::from_multipart(&mut multipart).await?;
    let document = form
        .file
        .ok_or_else(|| ApiError::unprocessable("Field required: file"))?;
    let query = effective_query(form.query);
    let file_path = temporary_document_path(&state.config.server.upload_dir);

    info!(
        file_name = %document.file_name,
        size = document.bytes.len(),
        "Analysis request received"
    );

    let outcome = process_document(&state, &document, &query, &file_path).await;
    remove_temporary_document(&file_path).await;

    match outcome {
        Ok(analysis) => {
            info!(file_name = %document.file_name, analysis_len = analysis.len(), "Analysis completed");
            Ok(Json(AnalyzeResponse {
                status: "success".to_string(),
                query,
                analysis,
                file_processed: document.file_name,
            }))
        }
        Err(e) => {
            error!(file_name = %document.file_name, error = %e, "Analysis failed");
            Err(ApiError::internal(format!(
                "Error processing financial document: {}",
                e
            )))
        }
    }
}

/// Save the upload, run the orchestrator on the trimmed query, then record the
/// result with the query exactly as submitted.
async fn process_document(
    state: &AppState,
    document: &UploadedDocument,
    query: &str,
    file_path: &Path,
) -> AppResult<String> {
    if let Some(dir) = file_path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(file_path, &document.bytes).await?;

    let analysis = state.orchestrator.run(query.trim(), file_path).await?;

    DatabaseOperations::insert_report(
        &state.pool,
        &NewAnalysisRecord {
            file_name: document.file_name.clone(),
            query: query.to_string(),
            analysis: analysis.clone(),
        },
    )
    .await?;

    Ok(analysis)
}

async fn remove_temporary_document(file_path: &Path) {
    if let Err(e) = tokio::fs::remove_file(file_path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            debug!(path = %file_path.display(), error = %e, "Could not remove temporary document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_query_defaults() {
        assert_eq!(effective_query(None), DEFAULT_QUERY);
        assert_eq!(effective_query(Some(String::new())), DEFAULT_QUERY);
        assert_eq!(effective_query(Some("  \n\t ".to_string())), DEFAULT_QUERY);
    }

    #[test]
    fn test_effective_query_keeps_untrimmed_text() {
        assert_eq!(effective_query(Some("  Summarize risks ".to_string())), "  Summarize risks ");
    }

    #[test]
    fn test_temporary_paths_are_unique() {
        let dir = Path::new("data");
        let first = temporary_document_path(dir);
        let second = temporary_document_path(dir);

        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(dir));
        assert!(first
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("financial_document_"));
    }
}
