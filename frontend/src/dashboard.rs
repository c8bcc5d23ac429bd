use std::future::Future;

use futures::future::{select, Either};
use futures::pin_mut;

use crate::models::StatisticsSummary;

/// Statistics refresh period.
pub const POLL_INTERVAL_MS: u32 = 5_000;

/// Latest summary shown on the dashboard. A failed refresh keeps the last good
/// summary on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    pub summary: StatisticsSummary,
    pub loaded: bool,
    pub last_error: Option<String>,
}

impl DashboardData {
    pub fn apply(&mut self, result: Result<StatisticsSummary, String>) {
        match result {
            Ok(summary) => {
                self.summary = summary;
                self.last_error = None;
            }
            Err(e) => {
                log::error!("Failed to fetch statistics: {e}");
                self.last_error = Some(e);
            }
        }
        self.loaded = true;
    }
}

/// Resolves `fetch` unless `deadline` fires first, in which case the refresh
/// counts as failed.
pub async fn within_deadline<F, D>(fetch: F, deadline: D) -> Result<StatisticsSummary, String>
where
    F: Future<Output = Result<StatisticsSummary, String>>,
    D: Future<Output = ()>,
{
    pin_mut!(fetch);
    pin_mut!(deadline);
    match select(fetch, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err("Statistics request timed out".to_string()),
    }
}

/// Tailwind gradient for a category bar.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Rooms" => "from-purple-500 to-purple-600",
        "Restaurant" => "from-pink-500 to-pink-600",
        "Facilities" => "from-amber-500 to-amber-600",
        "Prices" => "from-blue-500 to-blue-600",
        "Services" => "from-green-500 to-green-600",
        _ => "from-gray-500 to-gray-600",
    }
}

/// Whole-number share of all questions, 0 when there are none.
pub fn share_percent(count: u64, total: u64) -> u64 {
    if total == 0 { 0 } else { (count * 100 + total / 2) / total }
}
