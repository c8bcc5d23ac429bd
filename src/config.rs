use anyhow::Context;

pub const DEFAULT_PORT: u16 = 5050;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,https://cincinnati-psi.vercel.app";

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
}

impl GoogleOAuthConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }
}

/// Process configuration, read once from the environment at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub workflow_base_url: String,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub max_connections: u32,
    pub google: Option<GoogleOAuthConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .context("DATABASE_URL must be set (copy .env.example to .env)")?;
        let workflow_base_url = lookup("N8N_WEBHOOK_URL").context("N8N_WEBHOOK_URL must be set")?;

        let allowed_origins = parse_origins(
            &lookup("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        let port = match lookup("PORT") {
            Some(p) => p.parse().with_context(|| format!("PORT is not a valid port: {p}"))?,
            None => DEFAULT_PORT,
        };
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(n) => n.parse().with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {n}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let google = match (
            lookup("GOOGLE_CLIENT_ID"),
            lookup("GOOGLE_CLIENT_SECRET"),
            lookup("GOOGLE_REDIRECT_URI"),
        ) {
            (Some(id), Some(secret), Some(redirect)) => Some(GoogleOAuthConfig::new(id, secret, redirect)),
            _ => None,
        };

        Ok(Self { database_url, workflow_base_url, allowed_origins, port, max_connections, google })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
