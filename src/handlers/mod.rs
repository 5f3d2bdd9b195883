//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod chat;
pub mod health;
pub mod leaderboard;
pub mod matches;
pub mod profile;
pub mod sessions;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .nest("/profile", profile::routes())
        .nest("/matches", matches::routes())
        .nest("/chat", chat::routes())
        .nest("/sessions", sessions::routes())
        .nest("/leaderboard", leaderboard::routes())
}
