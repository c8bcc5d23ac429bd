pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod workflow;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, routing::post, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::models::MAX_PDF_BYTES;
use crate::routes::api_routes::{chat_handler, stats_handler, upload_pdf_handler};
use crate::routes::auth_routes::{google_auth_handler, google_callback_handler, google_status_handler};
use crate::routes::health_routes::{index_handler, test_db_handler};
use crate::state::AppState;

/// Request body limit for uploads: the PDF itself plus room for multipart framing.
/// Oversized files inside the limit are rejected by the upload service.
pub const UPLOAD_BODY_LIMIT: usize = MAX_PDF_BYTES + 1024 * 1024;

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/test-db", get(test_db_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/stats", get(stats_handler))
        .route(
            "/api/upload/pdf",
            post(upload_pdf_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/auth/google", get(google_auth_handler))
        .route("/api/auth/google/callback", get(google_callback_handler))
        .route("/api/auth/google/status", get(google_status_handler))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
