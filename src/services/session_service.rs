//! Session scheduling service

use uuid::Uuid;

use crate::{
    constants::SESSION_DURATIONS,
    db::SessionStore,
    error::{AppError, AppResult},
    models::{NewSession, Session},
};

/// Session scheduling service
pub struct SessionService;

impl SessionService {
    /// Schedule a new session in `scheduled` state
    pub async fn schedule<S>(store: &S, session: NewSession) -> AppResult<Uuid>
    where
        S: SessionStore + ?Sized,
    {
        if !SESSION_DURATIONS.contains(&session.duration) {
            return Err(AppError::InvalidInput("Invalid duration".to_string()));
        }

        let id = store.insert_session(session).await?;
        tracing::info!(session_id = %id, "Session scheduled");

        Ok(id)
    }

    /// Sessions the user teaches or attends, newest first
    pub async fn list_for_user<S>(store: &S, user_id: &Uuid) -> AppResult<Vec<Session>>
    where
        S: SessionStore + ?Sized,
    {
        Ok(store.sessions_for_user(user_id).await?)
    }
}
