//! Health check handlers

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Banner response
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Store diagnostics response
#[derive(Debug, Serialize)]
pub struct StoreStatusResponse {
    pub backend: String,
    pub store: String,
    pub collections: Vec<String>,
}

/// Root banner
async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "SkillSwap Backend Running".to_string(),
    })
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Probe the store; reports failures in the body rather than as an error status
async fn store_status(State(state): State<AppState>) -> Json<StoreStatusResponse> {
    let response = match state.store().describe().await {
        Ok(info) => StoreStatusResponse {
            backend: info.backend.to_string(),
            store: "connected".to_string(),
            collections: info.collections,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Store probe failed");
            let reason: String = e.to_string().chars().take(80).collect();
            StoreStatusResponse {
                backend: state.config().store.backend().to_string(),
                store: format!("error: {reason}"),
                collections: Vec::new(),
            }
        }
    };

    Json(response)
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
        .route("/test", get(store_status))
}
