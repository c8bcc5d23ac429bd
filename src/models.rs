use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Largest PDF accepted for upload (10 MiB).
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;
pub const PDF_MIME_TYPE: &str = "application/pdf";

// ── Chat ──────────────────────────────────────────────────────────────────────

/// Inbound `POST /api/chat` body. Both fields are optional at the wire level so
/// that a missing `message` is reported as a validation error, not a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body forwarded to the workflow's chat webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowChatPayload {
    pub message: String,
    pub session_id: String,
}

/// Shape of the workflow's chat answer. Anything that matches neither arm is
/// treated as a malformed reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WorkflowReply {
    Answer {
        response: String,
    },
    Failure {
        error: Value,
        #[serde(default)]
        details: Option<Value>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self { success: true, response: reply.response, timestamp: reply.timestamp }
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_sessions: u64,
    pub total_questions: u64,
    pub questions_by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: StatisticsSummary,
}

// ── Upload ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.into(), bytes }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Local checks that must pass before the document is sent anywhere.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.content_type != PDF_MIME_TYPE {
            return Err(AppError::UnsupportedMediaType { content_type: self.content_type.clone() });
        }
        if self.size() > MAX_PDF_BYTES {
            return Err(AppError::PayloadTooLarge { size: Some(self.size()), limit: MAX_PDF_BYTES });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

// ── OAuth credentials ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCredential {
    pub provider: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl OAuthCredential {
    /// A credential without an expiry never goes stale.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at > now)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub provider: String,
    pub connected: bool,
    pub expires_at: Option<DateTime<Utc>>,
}
