//! Matchmaking handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Matchmaking routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/{user_id}", get(handler::find_matches))
}
