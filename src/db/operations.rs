use sqlx::SqlitePool;
use chrono::Utc;

use crate::models::{AnalysisRecord, NewAnalysisRecord};
use crate::types::AppResult;

pub struct DatabaseOperations;

impl DatabaseOperations {
    /// Append one analysis to `financial_reports`.
    ///
    /// Records are append-only; nothing updates or deletes them.
    pub async fn insert_report(
        pool: &SqlitePool,
        record: &NewAnalysisRecord,
    ) -> AppResult<AnalysisRecord> {
        let row = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            INSERT INTO financial_reports (file_name, query, analysis, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, file_name, query, analysis, created_at
            "#,
        )
        .bind(&record.file_name)
        .bind(&record.query)
        .bind(&record.analysis)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        tracing::debug!(report_id = row.id, file_name = %row.file_name, "Analysis record stored");

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    async fn memory_pool() -> SqlitePool {
        let pool = crate::db::create_pool(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_insert_report_assigns_increasing_ids() {
        let pool = memory_pool().await;

        let first = DatabaseOperations::insert_report(
            &pool,
            &NewAnalysisRecord {
                file_name: "report.pdf".to_string(),
                query: "Summarize risks".to_string(),
                analysis: "Looks fine".to_string(),
            },
        )
        .await
        .unwrap();
        let second = DatabaseOperations::insert_report(
            &pool,
            &NewAnalysisRecord {
                file_name: "q2.pdf".to_string(),
                query: "  padded  ".to_string(),
                analysis: "Also fine".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.file_name, "report.pdf");
        assert_eq!(second.query, "  padded  ");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM financial_reports")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_created_at_is_insertion_time() {
        let pool = memory_pool().await;
        let before = Utc::now() - chrono::Duration::seconds(1);

        let row = DatabaseOperations::insert_report(
            &pool,
            &NewAnalysisRecord {
                file_name: "report.pdf".to_string(),
                query: "q".to_string(),
                analysis: "a".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(row.created_at >= before);
        assert!(row.created_at <= Utc::now() + chrono::Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_insert_fails_without_schema() {
        let pool = crate::db::create_pool(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();

        let result = DatabaseOperations::insert_report(
            &pool,
            &NewAnalysisRecord {
                file_name: "report.pdf".to_string(),
                query: "q".to_string(),
                analysis: "a".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(crate::types::AppError::Database(_))));
    }
}
