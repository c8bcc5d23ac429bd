use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::db::stats_repository::StatsStore;
use crate::errors::AppError;
use crate::models::StatisticsSummary;

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn StatsStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn StatsStore>) -> Self {
        Self { store }
    }

    /// Runs the three counting queries concurrently. There is no snapshot across
    /// them, so under concurrent writes the totals can drift by a few messages.
    pub async fn compute_summary(&self) -> Result<StatisticsSummary, AppError> {
        let (total_sessions, total_questions, questions_by_category) = tokio::try_join!(
            self.store.count_distinct_sessions(),
            self.store.count_messages(),
            self.store.count_by_category(),
        )?;

        Ok(StatisticsSummary { total_sessions, total_questions, questions_by_category })
    }

    pub async fn database_time(&self) -> Result<DateTime<Utc>, AppError> {
        self.store.server_time().await
    }
}
