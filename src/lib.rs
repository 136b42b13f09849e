// Financial Document Analyzer - investment analysis over uploaded financial PDFs

pub mod agents;
pub mod config;
pub mod db;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod tools;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
