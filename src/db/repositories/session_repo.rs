//! Session repository

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::{
        connection::PgStore,
        store::{SessionStore, StoreResult},
    },
    models::{NewSession, Session, SessionStatus},
};

#[async_trait]
impl SessionStore for PgStore {
    async fn insert_session(&self, session: NewSession) -> StoreResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO sessions (
                chat_id, teacher_id, learner_id, duration, scheduled_time,
                status, meet_link, zoom_link
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(session.chat_id)
        .bind(session.teacher_id)
        .bind(session.learner_id)
        .bind(session.duration)
        .bind(&session.scheduled_time)
        .bind(SessionStatus::Scheduled.as_str())
        .bind(&session.meet_link)
        .bind(&session.zoom_link)
        .fetch_one(self.pool())
        .await?;

        Ok(id)
    }

    async fn find_session(&self, id: &Uuid) -> StoreResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(r#"SELECT * FROM sessions WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(session)
    }

    async fn sessions_for_user(&self, user_id: &Uuid) -> StoreResult<Vec<Session>> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT * FROM sessions
            WHERE teacher_id = $1 OR learner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(sessions)
    }

    async fn set_session_status(&self, id: &Uuid, status: SessionStatus) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
