//! Chat handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::OkResponse,
    services::ChatService,
    state::AppState,
};

use super::{
    request::{EnsureChatRequest, MessagesQuery, SendMessageRequest},
    response::{ChatResponse, MessagesResponse},
};

/// Get or create the chat between two users
pub async fn ensure_chat(
    State(state): State<AppState>,
    Json(payload): Json<EnsureChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let chat_id = ChatService::ensure_chat(state.store(), payload.user_a, payload.user_b).await?;
    Ok(Json(ChatResponse { chat_id }))
}

/// Post a message to a chat
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<SendMessageRequest>,
) -> AppResult<Json<OkResponse>> {
    // Validate request
    payload.validate()?;

    ChatService::send_message(state.store(), payload.chat_id, payload.sender_id, payload.text)
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// List messages of a chat, oldest first
pub async fn get_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<Uuid>,
    Query(query): Query<MessagesQuery>,
) -> AppResult<Json<MessagesResponse>> {
    let messages = ChatService::get_messages(state.store(), &chat_id, query.limit).await?;
    Ok(Json(MessagesResponse { messages }))
}
