mod ats;
mod auth;
mod backend;
mod config;
mod errors;
mod models;
mod profile;
mod resume;
mod routes;
mod state;
mod templates;
mod uploads;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats::scoring::FixedKeywordScorer;
use crate::backend::HttpBackend;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::templates::catalog::load_catalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Backend-as-a-service client
    let backend = Arc::new(HttpBackend::new(
        &config.backend_url,
        config.backend_api_key.clone(),
        Duration::from_secs(config.backend_timeout_secs),
    )?);
    info!("Backend client initialized ({})", config.backend_url);

    // Template catalog: built-ins merged with the remote table
    let catalog = load_catalog(backend.as_ref(), config.tables.templates).await;
    info!("Template catalog loaded ({} templates)", catalog.all().len());

    let state = AppState::new(
        backend,
        config.clone(),
        catalog,
        Arc::new(FixedKeywordScorer),
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
