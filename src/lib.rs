//! SkillSwap - Peer Skill-Exchange Marketplace Backend
//!
//! This library provides the core functionality for the SkillSwap platform,
//! where users teach each other skills and pay for lessons in coins.
//!
//! # Features
//!
//! - Registration and editable profiles with skills and weekly availability
//! - Matchmaking on mutual teach/learn overlap
//! - Two-party chats
//! - Session scheduling and rating-driven settlement (coins, counters, badges)
//! - Leaderboard of the most active teachers
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Store**: Document store traits with PostgreSQL and in-memory backends
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{middleware::from_fn, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(handlers::routes())
        .layer(from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
