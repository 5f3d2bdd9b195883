//! Teaching session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Session database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub chat_id: Uuid,
    /// Empty when the participant has been detached from the session
    pub teacher_id: Option<Uuid>,
    pub learner_id: Option<Uuid>,
    /// Minutes, 30 or 60
    pub duration: i32,
    /// Free-form, not checked as a real datetime
    pub scheduled_time: String,
    pub status: String,
    pub meet_link: Option<String>,
    pub zoom_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Parsed lifecycle status
    pub fn status(&self) -> Option<SessionStatus> {
        SessionStatus::parse(&self.status)
    }

    /// Teacher and learner, only when both are present
    pub fn participants(&self) -> Option<(Uuid, Uuid)> {
        self.teacher_id.zip(self.learner_id)
    }

    /// Check if the user takes part in this session in either role
    pub fn involves(&self, user_id: &Uuid) -> bool {
        self.teacher_id.as_ref() == Some(user_id) || self.learner_id.as_ref() == Some(user_id)
    }
}

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Fields required to schedule a session
#[derive(Debug, Clone)]
pub struct NewSession {
    pub chat_id: Uuid,
    pub teacher_id: Uuid,
    pub learner_id: Uuid,
    pub duration: i32,
    pub scheduled_time: String,
    pub meet_link: Option<String>,
    pub zoom_link: Option<String>,
}
