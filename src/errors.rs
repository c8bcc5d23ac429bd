use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Top-level application error.
/// Client-correctable variants map to 400, everything else to 500.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Validation errors ────────────────────────────────────────────────────
    #[error("{field_name} is required")]
    MissingField { field_name: String },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    #[error("No PDF file uploaded")]
    MissingFile { field_name: String },

    #[error("Only PDF files are allowed")]
    UnsupportedMediaType { content_type: String },

    #[error("File exceeds the {limit} byte limit")]
    PayloadTooLarge { size: Option<usize>, limit: usize },

    // ── Upstream workflow errors ─────────────────────────────────────────────
    #[error("Workflow endpoint {endpoint} did not answer within {timeout_secs}s")]
    UpstreamTimeout { endpoint: String, timeout_secs: u64 },

    #[error("Workflow endpoint {endpoint} is unreachable: {message}")]
    UpstreamUnreachable { endpoint: String, message: String },

    #[error("Workflow endpoint {endpoint} failed: {message}")]
    UpstreamError {
        endpoint: String,
        status: Option<u16>,
        message: String,
        body: Option<Value>,
    },

    // ── Database errors ──────────────────────────────────────────────────────
    #[error("Database query failed: {message}")]
    DatabaseQueryFailed {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    // ── OAuth errors ─────────────────────────────────────────────────────────
    #[error("OAuth is not configured")]
    OAuthNotConfigured,

    #[error("OAuth token exchange failed: {message}")]
    OAuthExchangeFailed { message: String },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn db_query(message: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::DatabaseQueryFailed { message: message.into(), source }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MissingField { .. }
                | AppError::InvalidBody { .. }
                | AppError::MissingFile { .. }
                | AppError::UnsupportedMediaType { .. }
                | AppError::PayloadTooLarge { .. }
        )
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamTimeout { .. }
                | AppError::UpstreamUnreachable { .. }
                | AppError::UpstreamError { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Best-effort diagnostic for the `details` field of an error document.
    /// Upstream bodies are relayed as-is; validation errors carry the offending input.
    pub fn details(&self) -> Value {
        match self {
            AppError::MissingField { field_name } | AppError::MissingFile { field_name } => {
                json!({ "field": field_name })
            }
            AppError::UnsupportedMediaType { content_type } => {
                json!({ "contentType": content_type })
            }
            AppError::PayloadTooLarge { size, limit } => json!({ "size": size, "limit": limit }),
            AppError::UpstreamError { body: Some(body), .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }

    /// Converts into the JSON error document returned at the handler boundary.
    /// Server-side failures are reported under the operation's generic `failure`
    /// message; client errors keep their own message.
    pub fn into_api_error(self, failure: &str) -> ApiError {
        let status = self.status_code();
        let error = if self.is_validation() { self.to_string() } else { failure.to_string() };
        ApiError { status, body: ErrorBody { error, details: self.details() } }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: Value,
}

/// `{error, details}` document with its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
