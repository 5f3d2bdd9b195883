//! Document store contract
//!
//! Every service talks to persistence through these traits, one per logical
//! collection. Each method is a single-document operation that the backend
//! performs atomically; nothing here spans documents or collections.
//!
//! Absent documents are reported as `None` / `false`, never as errors.
//! Increments and set-unions against an absent document are no-ops.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Badge, Chat, Message, NewMessage, NewRating, NewSession, NewUser, ProfileUpdate, Rating,
    Session, SessionStatus, User, UserIncrement,
};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a store backend
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Connectivity or driver failure; must always propagate
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Unique constraint violated
    #[error("duplicate document: {0}")]
    Duplicate(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Duplicate(db_err.to_string())
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

/// User collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user with registration defaults, returning its generated id
    async fn insert_user(&self, user: NewUser) -> StoreResult<Uuid>;

    async fn find_user(&self, id: &Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Overwrite profile fields and `updated_at`; `false` if no document matched
    async fn update_profile(&self, id: &Uuid, profile: &ProfileUpdate) -> StoreResult<bool>;

    /// Apply numeric deltas atomically; `false` if no document matched
    async fn increment_user(&self, id: &Uuid, delta: UserIncrement) -> StoreResult<bool>;

    /// Merge badges into the stored set atomically; `false` if no document matched
    async fn add_badges(&self, id: &Uuid, badges: &[Badge]) -> StoreResult<bool>;

    /// Every user except the given one
    async fn list_users_except(&self, id: &Uuid) -> StoreResult<Vec<User>>;

    /// Users ordered by teaching sessions, most first
    async fn top_teachers(&self, limit: i64) -> StoreResult<Vec<User>>;
}

/// Session collection
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert_session(&self, session: NewSession) -> StoreResult<Uuid>;

    async fn find_session(&self, id: &Uuid) -> StoreResult<Option<Session>>;

    /// Sessions where the user is teacher or learner, newest first
    async fn sessions_for_user(&self, user_id: &Uuid) -> StoreResult<Vec<Session>>;

    /// Overwrite status and `updated_at`; `false` if no document matched
    async fn set_session_status(&self, id: &Uuid, status: SessionStatus) -> StoreResult<bool>;
}

/// Rating collection
#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn insert_rating(&self, rating: NewRating) -> StoreResult<Uuid>;

    /// Ratings received by a user, oldest first
    async fn ratings_for_ratee(&self, ratee_id: &Uuid) -> StoreResult<Vec<Rating>>;
}

/// Chat and message collections
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn find_chat_by_members(&self, members: &[Uuid; 2]) -> StoreResult<Option<Chat>>;

    async fn insert_chat(&self, members: [Uuid; 2]) -> StoreResult<Uuid>;

    /// Refresh `updated_at`; `false` if no document matched
    async fn touch_chat(&self, id: &Uuid) -> StoreResult<bool>;

    async fn insert_message(&self, message: NewMessage) -> StoreResult<Uuid>;

    /// Messages of a chat, oldest first
    async fn messages_for_chat(&self, chat_id: &Uuid, limit: i64) -> StoreResult<Vec<Message>>;
}

/// Backend diagnostics
#[derive(Debug, Clone)]
pub struct StoreInfo {
    pub backend: &'static str,
    pub collections: Vec<String>,
}

/// The full document store
#[async_trait]
pub trait Store: UserStore + SessionStore + RatingStore + ChatStore {
    /// Probe the backend and list its collections
    async fn describe(&self) -> StoreResult<StoreInfo>;
}
