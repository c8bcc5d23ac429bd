use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::GoogleOAuthConfig;
use crate::db::credential_repository::CredentialStore;
use crate::errors::AppError;
use crate::models::{AuthStatus, OAuthCredential};

pub const GOOGLE_PROVIDER: &str = "google";
const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";
const TOKEN_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

/// Google Drive consent flow. Credentials are persisted through the injected
/// [`CredentialStore`] so they survive restarts and are shared across instances.
#[derive(Clone)]
pub struct AuthService {
    oauth: Option<GoogleOAuthConfig>,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(oauth: Option<GoogleOAuthConfig>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { oauth, http: reqwest::Client::new(), credentials }
    }

    fn config(&self) -> Result<&GoogleOAuthConfig, AppError> {
        self.oauth.as_ref().ok_or(AppError::OAuthNotConfigured)
    }

    /// Consent URL requesting offline access to files created by the app.
    pub fn authorization_url(&self) -> Result<String, AppError> {
        let config = self.config()?;
        let url = reqwest::Url::parse_with_params(
            &config.auth_url,
            &[
                ("client_id", config.client_id.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", DRIVE_FILE_SCOPE),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| AppError::Unexpected(format!("Invalid OAuth authorization URL: {e}")))?;
        Ok(url.into())
    }

    /// Exchanges an authorization code and stores the resulting credential.
    pub async fn complete_authorization(&self, code: &str) -> Result<OAuthCredential, AppError> {
        let config = self.config()?;
        let response = self
            .http
            .post(&config.token_url)
            .timeout(TOKEN_EXCHANGE_TIMEOUT)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::OAuthExchangeFailed { message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Token endpoint answered HTTP {status}: {body}");
            return Err(AppError::OAuthExchangeFailed { message: format!("HTTP {status}: {body}") });
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::OAuthExchangeFailed { message: format!("malformed token response: {e}") })?;

        let now = Utc::now();
        let credential = OAuthCredential {
            provider: GOOGLE_PROVIDER.to_string(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            scope: tokens.scope,
            token_type: tokens.token_type,
            expires_at: tokens.expires_in.map(|secs| now + chrono::Duration::seconds(secs)),
            updated_at: now,
        };
        self.credentials.upsert(&credential).await?;
        info!("Stored {GOOGLE_PROVIDER} credential, expires at {:?}", credential.expires_at);
        Ok(credential)
    }

    pub async fn status(&self) -> Result<AuthStatus, AppError> {
        let credential = self.credentials.find(GOOGLE_PROVIDER).await?;
        let now = Utc::now();
        Ok(AuthStatus {
            provider: GOOGLE_PROVIDER.to_string(),
            connected: credential.as_ref().is_some_and(|c| c.is_usable_at(now)),
            expires_at: credential.and_then(|c| c.expires_at),
        })
    }
}
