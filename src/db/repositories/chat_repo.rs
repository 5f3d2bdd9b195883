//! Chat and message repository

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::{
        connection::PgStore,
        store::{ChatStore, StoreResult},
    },
    models::{Chat, Message, NewMessage},
};

#[async_trait]
impl ChatStore for PgStore {
    async fn find_chat_by_members(&self, members: &[Uuid; 2]) -> StoreResult<Option<Chat>> {
        let chat = sqlx::query_as::<_, Chat>(r#"SELECT * FROM chats WHERE members = $1"#)
            .bind(members.as_slice())
            .fetch_optional(self.pool())
            .await?;

        Ok(chat)
    }

    async fn insert_chat(&self, members: [Uuid; 2]) -> StoreResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO chats (members) VALUES ($1) RETURNING id"#,
        )
        .bind(members.as_slice())
        .fetch_one(self.pool())
        .await?;

        Ok(id)
    }

    async fn touch_chat(&self, id: &Uuid) -> StoreResult<bool> {
        let result = sqlx::query(r#"UPDATE chats SET updated_at = NOW() WHERE id = $1"#)
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_message(&self, message: NewMessage) -> StoreResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO messages (chat_id, sender_id, text)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(message.chat_id)
        .bind(message.sender_id)
        .bind(&message.text)
        .fetch_one(self.pool())
        .await?;

        Ok(id)
    }

    async fn messages_for_chat(&self, chat_id: &Uuid, limit: i64) -> StoreResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE chat_id = $1
            ORDER BY created_at
            LIMIT $2
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(messages)
    }
}
