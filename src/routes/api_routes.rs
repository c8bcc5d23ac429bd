use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::errors::AppError;
use crate::models::{
    ChatRequest, ChatResponse, StatsResponse, UploadResponse, UploadedDocument, MAX_PDF_BYTES, PDF_MIME_TYPE,
};
use crate::state::AppState;

pub const CHAT_FAILURE: &str = "Failed to get response from AI";
pub const STATS_FAILURE: &str = "Failed to fetch statistics";
pub const UPLOAD_FAILURE: &str = "Failed to upload PDF";
const UPLOAD_SUCCESS: &str = "PDF uploaded to Google Drive successfully";

/// Multipart field carrying the uploaded PDF.
pub const PDF_FIELD: &str = "pdf";

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/chat`: forwards one chat turn to the workflow
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return AppError::InvalidBody { message: rejection.body_text() }
                .into_api_error(CHAT_FAILURE)
                .into_response();
        }
    };

    match state.chat.chat(request).await {
        Ok(reply) => Json(ChatResponse::from(reply)).into_response(),
        Err(err) => {
            error!("Chat error: {err}");
            err.into_api_error(CHAT_FAILURE).into_response()
        }
    }
}

/// GET `/api/stats`: usage summary for the admin dashboard
pub async fn stats_handler(State(state): State<AppState>) -> Response {
    match state.stats.compute_summary().await {
        Ok(data) => Json(StatsResponse { success: true, data }).into_response(),
        Err(err) => {
            error!("Stats error: {err}");
            err.into_api_error(STATS_FAILURE).into_response()
        }
    }
}

/// POST `/api/upload/pdf`: multipart upload of the hotel information PDF
pub async fn upload_pdf_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let result = async {
        let mut multipart =
            multipart.map_err(|e| AppError::InvalidBody { message: e.body_text() })?;
        let document = read_pdf_field(&mut multipart).await?;
        state.uploads.upload_pdf(document).await
    }
    .await;

    match result {
        Ok(data) => Json(UploadResponse { success: true, message: UPLOAD_SUCCESS.to_string(), data })
            .into_response(),
        Err(err) => {
            error!("Upload error: {err}");
            err.into_api_error(UPLOAD_FAILURE).into_response()
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

async fn read_pdf_field(multipart: &mut Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("document.pdf").to_string();
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();

        // Reject before buffering the body.
        if content_type != PDF_MIME_TYPE {
            return Err(AppError::UnsupportedMediaType { content_type });
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(UploadedDocument::new(file_name, content_type, bytes));
    }
    Err(AppError::MissingFile { field_name: PDF_FIELD.to_string() })
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { size: None, limit: MAX_PDF_BYTES }
    } else {
        AppError::InvalidBody { message: err.body_text() }
    }
}
