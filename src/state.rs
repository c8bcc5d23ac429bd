use std::sync::Arc;

use sqlx::PgPool;

use crate::config::GoogleOAuthConfig;
use crate::db::credential_repository::{CredentialStore, PgCredentialRepository};
use crate::db::stats_repository::{PgStatsRepository, StatsStore};
use crate::service::auth_service::AuthService;
use crate::service::chat_service::ChatService;
use crate::service::stats_service::StatsService;
use crate::service::upload_service::UploadService;
use crate::workflow::WorkflowClient;

/// Services shared by all handlers. Cloning is cheap: every service holds `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub stats: StatsService,
    pub uploads: UploadService,
    pub auth: AuthService,
}

impl AppState {
    /// Wires services from explicit collaborators.
    pub fn new(
        workflow: Arc<dyn WorkflowClient>,
        stats_store: Arc<dyn StatsStore>,
        credentials: Arc<dyn CredentialStore>,
        google: Option<GoogleOAuthConfig>,
    ) -> Self {
        Self {
            chat: ChatService::new(workflow.clone()),
            stats: StatsService::new(stats_store),
            uploads: UploadService::new(workflow),
            auth: AuthService::new(google, credentials),
        }
    }

    /// Wires the Postgres-backed repositories.
    pub fn with_pool(
        pool: PgPool,
        workflow: Arc<dyn WorkflowClient>,
        google: Option<GoogleOAuthConfig>,
    ) -> Self {
        Self::new(
            workflow,
            Arc::new(PgStatsRepository::new(pool.clone())),
            Arc::new(PgCredentialRepository::new(pool)),
            google,
        )
    }
}
