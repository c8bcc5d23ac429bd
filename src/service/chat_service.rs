use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::models::{ChatReply, ChatRequest, WorkflowChatPayload};
use crate::workflow::WorkflowClient;

pub const DEFAULT_SESSION_ID: &str = "default";

#[derive(Clone)]
pub struct ChatService {
    workflow: Arc<dyn WorkflowClient>,
}

impl ChatService {
    pub fn new(workflow: Arc<dyn WorkflowClient>) -> Self {
        Self { workflow }
    }

    /// Validates a chat turn and forwards it to the workflow.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, AppError> {
        let payload = Self::prepare(request)?;
        info!("Chat message received for session {}: {}", payload.session_id, payload.message);
        self.workflow.send_chat(&payload).await
    }

    /// Trims the message and resolves the session id. A blank or missing message is
    /// rejected; a blank or missing session id becomes [`DEFAULT_SESSION_ID`].
    pub fn prepare(request: ChatRequest) -> Result<WorkflowChatPayload, AppError> {
        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::MissingField { field_name: "message".to_string() })?
            .to_string();

        let session_id = request
            .session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

        Ok(WorkflowChatPayload { message, session_id })
    }
}
