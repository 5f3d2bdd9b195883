//! Chat request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Open (or find) the chat between two users
#[derive(Debug, Deserialize)]
pub struct EnsureChatRequest {
    pub user_a: Uuid,
    pub user_b: Uuid,
}

/// Post a message
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub chat_id: Uuid,
    pub sender_id: Uuid,

    #[validate(length(min = 1))]
    pub text: String,
}

/// Message listing query parameters
#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<i64>,
}
