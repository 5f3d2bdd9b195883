//! Chat handlers

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

/// Chat routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ensure", post(handler::ensure_chat))
        .route("/send", post(handler::send_message))
        .route("/messages/{chat_id}", get(handler::get_messages))
}
