//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/` - Liveness message
//! - `/analyze` - Financial document upload and analysis
//! - `/api/health` - Health check including the database
//! - `/ui` - Browser client for `/analyze`

pub mod analyze;
pub mod health;
pub mod ui;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_upload_bytes = state.config.server.max_upload_bytes;
    let allowed_origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(health::router(state.clone()))
        .merge(analyze::router(state))
        .merge(ui::router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &allowed_origins)
}
