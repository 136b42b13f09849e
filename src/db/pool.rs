use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    // An in-memory database lives and dies with its connection, so keep exactly one open
    let pool = if config.url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?
    };

    health_check(&pool).await?;

    Ok(pool)
}

pub async fn health_check(pool: &SqlitePool) -> Result<bool> {
    let _result = sqlx::query("SELECT 1").fetch_one(pool).await?;

    Ok(true)
}
