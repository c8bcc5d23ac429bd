use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::state::AppState;

const AUTH_STATUS_FAILURE: &str = "Failed to read authorization status";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// GET `/api/auth/google`: redirect to the Google consent screen
pub async fn google_auth_handler(State(state): State<AppState>) -> Response {
    match state.auth.authorization_url() {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(err) => {
            error!("Cannot start Google authorization: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// GET `/api/auth/google/callback`: exchange the code and store the credential
pub async fn google_callback_handler(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let code = match (params.code, params.error) {
        (Some(code), _) if !code.is_empty() => code,
        (_, Some(reason)) => {
            error!("Google authorization was denied: {reason}");
            return (StatusCode::BAD_REQUEST, format!("Authorization denied: {reason}")).into_response();
        }
        _ => return (StatusCode::BAD_REQUEST, "Missing authorization code").into_response(),
    };

    match state.auth.complete_authorization(&code).await {
        Ok(_) => "Authorization successful! You can close this window.".into_response(),
        Err(err) => {
            error!("Error getting tokens: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Authorization failed").into_response()
        }
    }
}

/// GET `/api/auth/google/status`: whether a usable credential is stored
pub async fn google_status_handler(State(state): State<AppState>) -> Response {
    match state.auth.status().await {
        Ok(status) => Json(status).into_response(),
        Err(err) => {
            error!("Auth status error: {err}");
            err.into_api_error(AUTH_STATUS_FAILURE).into_response()
        }
    }
}
