use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::UploadedDocument;
use crate::workflow::WorkflowClient;

/// Hands the hotel information PDF to the workflow, which replaces the
/// previously stored document.
#[derive(Clone)]
pub struct UploadService {
    workflow: Arc<dyn WorkflowClient>,
}

impl UploadService {
    pub fn new(workflow: Arc<dyn WorkflowClient>) -> Self {
        Self { workflow }
    }

    pub async fn upload_pdf(&self, document: UploadedDocument) -> Result<Value, AppError> {
        document.validate()?;
        info!("File received: {} {} bytes", document.file_name, document.size());
        self.workflow.upload_document(&document).await
    }
}
