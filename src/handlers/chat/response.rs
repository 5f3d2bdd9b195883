//! Chat response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::Message;

/// Chat id response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub chat_id: Uuid,
}

/// Message list response
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}
