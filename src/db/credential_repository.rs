use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use crate::errors::AppError;
use crate::models::OAuthCredential;

/// Persisted OAuth credentials, one record per provider.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts or replaces the provider's credential.
    async fn upsert(&self, credential: &OAuthCredential) -> Result<(), AppError>;

    async fn find(&self, provider: &str) -> Result<Option<OAuthCredential>, AppError>;
}

#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialRepository {
    async fn upsert(&self, credential: &OAuthCredential) -> Result<(), AppError> {
        // Google only returns a refresh token on first consent; keep the old one otherwise.
        sqlx::query(
            "INSERT INTO oauth_credentials
                 (provider, access_token, refresh_token, scope, token_type, expires_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (provider) DO UPDATE SET
                 access_token = EXCLUDED.access_token,
                 refresh_token = COALESCE(EXCLUDED.refresh_token, oauth_credentials.refresh_token),
                 scope = EXCLUDED.scope,
                 token_type = EXCLUDED.token_type,
                 expires_at = EXCLUDED.expires_at,
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(&credential.provider)
        .bind(&credential.access_token)
        .bind(&credential.refresh_token)
        .bind(&credential.scope)
        .bind(&credential.token_type)
        .bind(credential.expires_at)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save credential for {}: {e}", credential.provider);
            AppError::db_query("Failed to save credential", e)
        })?;
        Ok(())
    }

    async fn find(&self, provider: &str) -> Result<Option<OAuthCredential>, AppError> {
        sqlx::query_as::<_, OAuthCredential>(
            "SELECT provider, access_token, refresh_token, scope, token_type, expires_at, updated_at
             FROM oauth_credentials
             WHERE provider = $1",
        )
        .bind(provider)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to load credential for {provider}: {e}");
            AppError::db_query(format!("Failed to load credential for {provider}"), e)
        })
    }
}
