use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::error;

use crate::errors::AppError;
use crate::models::CategoryCount;

/// Bucket for messages stored without a category. Must match the literal in
/// the Postgres category query.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Read-only view of the chat message store used by the statistics dashboard.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn count_distinct_sessions(&self) -> Result<u64, AppError>;

    async fn count_messages(&self) -> Result<u64, AppError>;

    /// Message counts per category, null categories folded into [`UNCATEGORIZED`],
    /// largest count first.
    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, AppError>;

    /// Database clock, used as a connectivity probe.
    async fn server_time(&self) -> Result<DateTime<Utc>, AppError>;
}

#[derive(Clone)]
pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category: String,
    count: i64,
}

fn non_negative(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

#[async_trait]
impl StatsStore for PgStatsRepository {
    async fn count_distinct_sessions(&self) -> Result<u64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT session_id) FROM chat_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to count sessions: {e}");
                AppError::db_query("Failed to count sessions", e)
            })?;
        Ok(non_negative(total))
    }

    async fn count_messages(&self) -> Result<u64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to count messages: {e}");
                AppError::db_query("Failed to count messages", e)
            })?;
        Ok(non_negative(total))
    }

    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT COALESCE(category, 'Uncategorized') AS category, COUNT(*) AS count
             FROM chat_messages
             GROUP BY 1
             ORDER BY count DESC, category ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to count messages by category: {e}");
            AppError::db_query("Failed to count messages by category", e)
        })?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryCount { category: row.category, count: non_negative(row.count) })
            .collect())
    }

    async fn server_time(&self) -> Result<DateTime<Utc>, AppError> {
        sqlx::query_scalar("SELECT NOW()")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database probe failed: {e}");
                AppError::db_query("Database probe failed", e)
            })
    }
}
