use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{ChatReply, UploadedDocument, WorkflowChatPayload, WorkflowReply};

pub const CHAT_TIMEOUT: Duration = Duration::from_secs(30);
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const CHAT_PATH: &str = "/webhook/chat";
const UPLOAD_PATH: &str = "/webhook/upload-pdf-to-drive";
/// Multipart field the upload workflow reads the file from.
const UPLOAD_FIELD: &str = "data";

/// Outbound calls to the external automation workflow.
/// Every call is attempted exactly once.
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    async fn send_chat(&self, payload: &WorkflowChatPayload) -> Result<ChatReply, AppError>;

    /// Forwards a document and returns the workflow's acknowledgment.
    async fn upload_document(&self, document: &UploadedDocument) -> Result<Value, AppError>;
}

/// [`WorkflowClient`] over HTTP (n8n webhooks).
#[derive(Clone)]
pub struct HttpWorkflowClient {
    http: reqwest::Client,
    base_url: String,
    chat_timeout: Duration,
    upload_timeout: Duration,
}

impl HttpWorkflowClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        Self::with_timeouts(base_url, CHAT_TIMEOUT, UPLOAD_TIMEOUT)
    }

    pub fn with_timeouts(
        base_url: &str,
        chat_timeout: Duration,
        upload_timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_timeout,
            upload_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn dispatch(
        &self,
        endpoint: &str,
        timeout: Duration,
        request: reqwest::RequestBuilder,
    ) -> Result<bytes::Bytes, AppError> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(endpoint, timeout, e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| classify(endpoint, timeout, e))?;

        if !status.is_success() {
            error!("Workflow {endpoint} answered HTTP {status}");
            return Err(AppError::UpstreamError {
                endpoint: endpoint.to_string(),
                status: Some(status.as_u16()),
                message: format!("HTTP {status}"),
                body: body_value(&body),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl WorkflowClient for HttpWorkflowClient {
    async fn send_chat(&self, payload: &WorkflowChatPayload) -> Result<ChatReply, AppError> {
        let endpoint = self.endpoint(CHAT_PATH);
        let request = self.http.post(&endpoint).json(payload);
        let body = self.dispatch(&endpoint, self.chat_timeout, request).await?;

        match serde_json::from_slice::<WorkflowReply>(&body) {
            Ok(WorkflowReply::Answer { response }) => {
                info!("AI response for session {}: {response}", payload.session_id);
                Ok(ChatReply { response, timestamp: Utc::now() })
            }
            Ok(WorkflowReply::Failure { error, details }) => {
                error!("Workflow reported a failure for session {}: {error}", payload.session_id);
                Err(AppError::UpstreamError {
                    endpoint,
                    status: None,
                    message: "workflow reported an error".to_string(),
                    body: Some(serde_json::json!({ "error": error, "details": details })),
                })
            }
            Err(e) => {
                error!("Malformed workflow response from {endpoint}: {e}");
                Err(AppError::UpstreamError {
                    endpoint,
                    status: None,
                    message: format!("malformed workflow response: {e}"),
                    body: body_value(&body),
                })
            }
        }
    }

    async fn upload_document(&self, document: &UploadedDocument) -> Result<Value, AppError> {
        document.validate()?;

        let endpoint = self.endpoint(UPLOAD_PATH);
        let part = Part::bytes(document.bytes.to_vec())
            .file_name(document.file_name.clone())
            .mime_str(&document.content_type)
            .map_err(|e| AppError::Unexpected(format!("Invalid content type: {e}")))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        info!("Sending {} ({} bytes) to {endpoint}", document.file_name, document.size());
        let request = self.http.post(&endpoint).multipart(form);
        let body = self.dispatch(&endpoint, self.upload_timeout, request).await?;
        let ack = body_value(&body).unwrap_or(Value::Null);
        info!("Workflow upload response: {ack}");
        Ok(ack)
    }
}

fn classify(endpoint: &str, timeout: Duration, err: reqwest::Error) -> AppError {
    error!("Workflow call to {endpoint} failed: {err}");
    if err.is_timeout() {
        AppError::UpstreamTimeout { endpoint: endpoint.to_string(), timeout_secs: timeout.as_secs() }
    } else if err.is_connect() {
        AppError::UpstreamUnreachable { endpoint: endpoint.to_string(), message: err.to_string() }
    } else {
        AppError::UpstreamError {
            endpoint: endpoint.to_string(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            body: None,
        }
    }
}

/// JSON when the body parses, the raw text otherwise, `None` when empty.
fn body_value(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body)
        .ok()
        .or_else(|| Some(Value::String(String::from_utf8_lossy(body).into_owned())))
}
