//! SkillSwap - Application Entry Point
//!
//! This is the main entry point for the SkillSwap server.

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skillswap::{
    config::{LogFormat, StoreConfig, CONFIG},
    db::{self, MemoryStore, PgStore, Store},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    match CONFIG.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting SkillSwap server...");

    let store: Arc<dyn Store> = match &CONFIG.store {
        StoreConfig::Postgres(database) => {
            // Initialize database connection pool
            tracing::info!("Connecting to database...");
            let pool = db::create_pool(database).await?;

            // Run database migrations
            tracing::info!("Running database migrations...");
            db::run_migrations(&pool).await?;

            Arc::new(PgStore::new(pool))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Create application state
    let state = AppState::new(store, CONFIG.clone());

    // Build the router
    let app = skillswap::app(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
