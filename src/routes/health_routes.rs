use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::state::AppState;

/// GET `/`: service banner
pub async fn index_handler() -> Json<Value> {
    Json(json!({ "message": "Cincinnati Hotel Backend API" }))
}

/// GET `/test-db`: database probe; always 200 so it can be read from a browser
pub async fn test_db_handler(State(state): State<AppState>) -> Json<Value> {
    info!("Testing database connection...");
    match state.stats.database_time().await {
        Ok(time) => {
            info!("Database query successful: {time}");
            Json(json!({ "success": true, "time": time }))
        }
        Err(err) => {
            error!("Database test error: {err}");
            Json(json!({ "success": false, "error": err.to_string() }))
        }
    }
}
