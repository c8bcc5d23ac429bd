use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Successful `POST /api/chat` response.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub timestamp: String,
}

/// `{error, details}` document returned on any backend failure.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub details: Value,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Matches the backend `StatisticsSummary`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_sessions: u64,
    pub total_questions: u64,
    pub questions_by_category: Vec<CategoryCount>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: StatisticsSummary,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Value,
}
