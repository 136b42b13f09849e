use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

pub use operations::*;
pub use pool::*;

pub mod operations;
pub mod pool;

/// Create the `financial_reports` schema if it does not exist yet
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    info!("Database migrations completed");

    Ok(())
}
