//! Session scheduling and rating handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Session routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/schedule", post(handler::schedule_session))
        .route("/rate", post(handler::rate_session))
        .route("/{user_id}", get(handler::list_sessions))
}
