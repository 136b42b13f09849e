use axum::{extract::State, routing::get, Json, Router};
use tracing::warn;

use crate::db;
use crate::models::{AppState, HealthResponse, RootResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .with_state(state)
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Financial Document Analyzer API is running".to_string(),
    })
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db::health_check(&state.pool).await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            "unavailable".to_string()
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
    })
}
