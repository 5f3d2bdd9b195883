//! Profile handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Profile routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", get(handler::get_profile).put(handler::update_profile))
        .route("/{user_id}/ratings", get(handler::get_ratings))
}
