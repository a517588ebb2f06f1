use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use campus_guide_api::app::{traced_app, AppState};
use campus_guide_api::config;
use campus_guide_api::is_development;
use campus_guide_api::middleware::Gate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting Campus Guide API in {:?} mode", config.environment);
    if is_development!() {
        tracing::warn!("Development mode: sessions are signed with the built-in development secret unless SECURITY_JWT_SECRET is set");
    }

    let gate = Arc::new(Gate::from_config());
    tracing::info!("Request gate stages: {:?}", gate.stage_names());

    let app = traced_app(AppState::postgres(), gate, config.api.enable_request_logging);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Campus Guide API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
