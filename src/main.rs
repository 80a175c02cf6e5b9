mod api_doc;
mod auth;
mod config;
mod error;
mod handlers;
mod memory;
mod models;
mod routes;
mod spanner;
mod state;
mod store;

use anyhow::Context;
use auth::CredentialVerifier;
use config::{Config, StorageBackend};
use memory::MemoryStore;
use spanner::SpannerStore;
use state::AppState;
use std::sync::Arc;
use store::SiteStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("site-content-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store: Arc<dyn SiteStore> = match &config.storage {
        StorageBackend::Spanner(spanner) => Arc::new(SpannerStore::from_config(spanner).await?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    let verifier = CredentialVerifier::from_config(&config);
    tracing::info!("Content edits restricted to {}", verifier.admin_identity());

    let app = routes::router(AppState::new(store, verifier));

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("site-content-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
