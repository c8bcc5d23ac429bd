use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use hotel_concierge::build_router;
use hotel_concierge::config::AppConfig;
use hotel_concierge::state::AppState;
use hotel_concierge::workflow::HttpWorkflowClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_concierge=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    // ── Database ──────────────────────────────────────────────────────────────
    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    info!("Database connection established and migrations applied");

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let workflow = HttpWorkflowClient::new(&config.workflow_base_url)?;
    let state = AppState::with_pool(pool, Arc::new(workflow), config.google.clone());
    let app = build_router(state, &config.allowed_origins);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{addr}/");
    info!("Test DB: http://{addr}/test-db");
    info!("Stats: http://{addr}/api/stats");

    axum::serve(listener, app).await?;
    Ok(())
}
