//! Chat service

use uuid::Uuid;

use crate::{
    constants::{DEFAULT_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT},
    db::{ChatStore, StoreError},
    error::{AppError, AppResult},
    models::{chat_members, Message, NewMessage},
};

/// Chat service
pub struct ChatService;

impl ChatService {
    /// Get the chat between two users, creating it on first contact
    pub async fn ensure_chat<S>(store: &S, user_a: Uuid, user_b: Uuid) -> AppResult<Uuid>
    where
        S: ChatStore + ?Sized,
    {
        let members = chat_members(user_a, user_b);

        if let Some(chat) = store.find_chat_by_members(&members).await? {
            return Ok(chat.id);
        }

        match store.insert_chat(members).await {
            Ok(id) => {
                tracing::debug!(chat_id = %id, "Chat created");
                Ok(id)
            }
            // created concurrently by the other member
            Err(StoreError::Duplicate(_)) => store
                .find_chat_by_members(&members)
                .await?
                .map(|chat| chat.id)
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Chat vanished after conflict"))),
            Err(e) => Err(e.into()),
        }
    }

    /// Post a message and bump the chat's activity timestamp
    pub async fn send_message<S>(store: &S, chat_id: Uuid, sender_id: Uuid, text: String) -> AppResult<Uuid>
    where
        S: ChatStore + ?Sized,
    {
        let id = store
            .insert_message(NewMessage {
                chat_id,
                sender_id,
                text,
            })
            .await?;

        if !store.touch_chat(&chat_id).await? {
            tracing::debug!(chat_id = %chat_id, "Message posted to unknown chat");
        }

        Ok(id)
    }

    /// Messages of a chat, oldest first
    pub async fn get_messages<S>(store: &S, chat_id: &Uuid, limit: Option<i64>) -> AppResult<Vec<Message>>
    where
        S: ChatStore + ?Sized,
    {
        let limit = limit.unwrap_or(DEFAULT_MESSAGE_LIMIT).clamp(1, MAX_MESSAGE_LIMIT);
        Ok(store.messages_for_chat(chat_id, limit).await?)
    }
}
