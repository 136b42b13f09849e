use std::sync::Arc;

use sqlx::SqlitePool;

use crate::agents::Orchestrator;
use crate::config::Config;

/// Shared handler state; the pool and orchestrator are injected at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub orchestrator: Arc<dyn Orchestrator>,
}

// Note: FromRow is needed for runtime query_as (without DATABASE_URL at compile time)

/// One row of `financial_reports`
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct AnalysisRecord {
    pub id: i64,
    pub file_name: String,
    pub query: String,
    pub analysis: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnalysisRecord {
    pub file_name: String,
    pub query: String,
    pub analysis: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    pub query: String,
    pub analysis: String,
    pub file_processed: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
}
