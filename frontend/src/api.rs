use gloo_net::http::{Request, Response};
use web_sys::{File, FormData};

use crate::models::{ApiErrorBody, ChatRequest, ChatResponse, StatisticsSummary, StatsResponse, UploadResponse};

/// Base URL of the backend API server, overridable at build time.
const API_BASE: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "http://localhost:5050",
};

/// Reads the backend's `{error, details}` document, falling back to the status code.
async fn error_message(resp: Response) -> String {
    match resp.json::<ApiErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("Server error: {}", resp.status()),
    }
}

/// Sends one chat turn and returns the bot's reply text.
pub async fn send_chat(message: &str, session_id: &str) -> Result<String, String> {
    let body = ChatRequest { message: message.to_string(), session_id: session_id.to_string() };

    let resp = Request::post(&format!("{API_BASE}/api/chat"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(error_message(resp).await);
    }

    let reply = resp.json::<ChatResponse>().await.map_err(|e| format!("Parse error: {e}"))?;
    if reply.success { Ok(reply.response) } else { Err("Chat request was not successful".to_string()) }
}

/// Fetches the usage summary shown on the admin dashboard.
pub async fn fetch_statistics() -> Result<StatisticsSummary, String> {
    let resp = Request::get(&format!("{API_BASE}/api/stats"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(error_message(resp).await);
    }

    let stats = resp.json::<StatsResponse>().await.map_err(|e| format!("Parse error: {e}"))?;
    if stats.success { Ok(stats.data) } else { Err("Statistics request was not successful".to_string()) }
}

/// Uploads the hotel information PDF under the `pdf` form field.
pub async fn upload_pdf(file: &File) -> Result<UploadResponse, String> {
    let form = FormData::new().map_err(|e| format!("Form error: {e:?}"))?;
    form.append_with_blob_and_filename("pdf", file, &file.name())
        .map_err(|e| format!("Form error: {e:?}"))?;

    let resp = Request::post(&format!("{API_BASE}/api/upload/pdf"))
        .body(form)
        .map_err(|e| format!("Request error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(error_message(resp).await);
    }

    resp.json::<UploadResponse>().await.map_err(|e| format!("Parse error: {e}"))
}
