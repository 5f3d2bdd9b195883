//! Rating model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rating database model, immutable once inserted
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub session_id: Uuid,
    pub rater_id: Uuid,
    pub ratee_id: Uuid,
    pub score: i32,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to record a rating
#[derive(Debug, Clone)]
pub struct NewRating {
    pub session_id: Uuid,
    pub rater_id: Uuid,
    pub ratee_id: Uuid,
    pub score: i32,
    pub feedback: Option<String>,
}
