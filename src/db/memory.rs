//! In-process document store
//!
//! Keeps every collection in insertion order behind a single lock. Each trait
//! call takes the lock once, so every operation is atomic per document just
//! like the database backend. Nothing is persisted across restarts.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    constants::{backends, collections, STARTING_COINS},
    models::{
        Badge, Chat, Message, NewMessage, NewRating, NewSession, NewUser, ProfileUpdate, Rating,
        Session, SessionStatus, User, UserIncrement,
    },
};

use super::store::{
    ChatStore, RatingStore, SessionStore, Store, StoreError, StoreInfo, StoreResult, UserStore,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    sessions: Vec<Session>,
    ratings: Vec<Rating>,
    chats: Vec<Chat>,
    messages: Vec<Message>,
}

/// Memory-backed store
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<Uuid> {
        let mut inner = self.inner.write();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!("email {}", user.email)));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        inner.users.push(User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            name: String::new(),
            age: None,
            city: None,
            teach_skills: Vec::new(),
            learn_skills: Vec::new(),
            availability: Json(Vec::new()),
            coins: STARTING_COINS,
            rating_total: 0,
            rating_count: 0,
            badges: Vec::new(),
            teaching_sessions: 0,
            learning_sessions: 0,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn find_user(&self, id: &Uuid) -> StoreResult<Option<User>> {
        Ok(self.inner.read().users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.inner.read().users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_profile(&self, id: &Uuid, profile: &ProfileUpdate) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let Some(user) = inner.users.iter_mut().find(|u| u.id == *id) else {
            return Ok(false);
        };

        user.name = profile.name.clone();
        user.age = profile.age;
        user.city = profile.city.clone();
        user.teach_skills = profile.teach_skills.clone();
        user.learn_skills = profile.learn_skills.clone();
        user.availability = Json(profile.availability.clone());
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn increment_user(&self, id: &Uuid, delta: UserIncrement) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let Some(user) = inner.users.iter_mut().find(|u| u.id == *id) else {
            return Ok(false);
        };

        user.coins += delta.coins;
        user.teaching_sessions += delta.teaching_sessions;
        user.learning_sessions += delta.learning_sessions;
        user.rating_total += delta.rating_total;
        user.rating_count += delta.rating_count;
        Ok(true)
    }

    async fn add_badges(&self, id: &Uuid, badges: &[Badge]) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let Some(user) = inner.users.iter_mut().find(|u| u.id == *id) else {
            return Ok(false);
        };

        for badge in badges {
            if !user.has_badge(badge.label()) {
                user.badges.push(badge.label().to_string());
            }
        }
        user.badges.sort();
        Ok(true)
    }

    async fn list_users_except(&self, id: &Uuid) -> StoreResult<Vec<User>> {
        Ok(self
            .inner
            .read()
            .users
            .iter()
            .filter(|u| u.id != *id)
            .cloned()
            .collect())
    }

    async fn top_teachers(&self, limit: i64) -> StoreResult<Vec<User>> {
        let mut users = self.inner.read().users.clone();
        users.sort_by(|a, b| b.teaching_sessions.cmp(&a.teaching_sessions));
        users.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(users)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert_session(&self, session: NewSession) -> StoreResult<Uuid> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.inner.write().sessions.push(Session {
            id,
            chat_id: session.chat_id,
            teacher_id: Some(session.teacher_id),
            learner_id: Some(session.learner_id),
            duration: session.duration,
            scheduled_time: session.scheduled_time,
            status: SessionStatus::Scheduled.as_str().to_string(),
            meet_link: session.meet_link,
            zoom_link: session.zoom_link,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn find_session(&self, id: &Uuid) -> StoreResult<Option<Session>> {
        Ok(self.inner.read().sessions.iter().find(|s| s.id == *id).cloned())
    }

    async fn sessions_for_user(&self, user_id: &Uuid) -> StoreResult<Vec<Session>> {
        Ok(self
            .inner
            .read()
            .sessions
            .iter()
            .rev()
            .filter(|s| s.involves(user_id))
            .cloned()
            .collect())
    }

    async fn set_session_status(&self, id: &Uuid, status: SessionStatus) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let Some(session) = inner.sessions.iter_mut().find(|s| s.id == *id) else {
            return Ok(false);
        };

        session.status = status.as_str().to_string();
        session.updated_at = Utc::now();
        Ok(true)
    }
}

#[async_trait]
impl RatingStore for MemoryStore {
    async fn insert_rating(&self, rating: NewRating) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        self.inner.write().ratings.push(Rating {
            id,
            session_id: rating.session_id,
            rater_id: rating.rater_id,
            ratee_id: rating.ratee_id,
            score: rating.score,
            feedback: rating.feedback,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn ratings_for_ratee(&self, ratee_id: &Uuid) -> StoreResult<Vec<Rating>> {
        Ok(self
            .inner
            .read()
            .ratings
            .iter()
            .filter(|r| r.ratee_id == *ratee_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn find_chat_by_members(&self, members: &[Uuid; 2]) -> StoreResult<Option<Chat>> {
        Ok(self
            .inner
            .read()
            .chats
            .iter()
            .find(|c| c.members.as_slice() == members.as_slice())
            .cloned())
    }

    async fn insert_chat(&self, members: [Uuid; 2]) -> StoreResult<Uuid> {
        let mut inner = self.inner.write();
        if inner.chats.iter().any(|c| c.members.as_slice() == members.as_slice()) {
            return Err(StoreError::Duplicate("chat members".to_string()));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        inner.chats.push(Chat {
            id,
            members: members.to_vec(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn touch_chat(&self, id: &Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let Some(chat) = inner.chats.iter_mut().find(|c| c.id == *id) else {
            return Ok(false);
        };

        chat.updated_at = Utc::now();
        Ok(true)
    }

    async fn insert_message(&self, message: NewMessage) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        self.inner.write().messages.push(Message {
            id,
            chat_id: message.chat_id,
            sender_id: message.sender_id,
            text: message.text,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn messages_for_chat(&self, chat_id: &Uuid, limit: i64) -> StoreResult<Vec<Message>> {
        Ok(self
            .inner
            .read()
            .messages
            .iter()
            .filter(|m| m.chat_id == *chat_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn describe(&self) -> StoreResult<StoreInfo> {
        Ok(StoreInfo {
            backend: backends::MEMORY,
            collections: collections::ALL.iter().map(|c| c.to_string()).collect(),
        })
    }
}
