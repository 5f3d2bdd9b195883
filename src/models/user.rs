//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// User database model
///
/// The running rating mean is kept as a sum plus a count so both can be
/// bumped with one atomic increment; the average is derived on read.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub age: Option<i32>,
    pub city: Option<String>,
    pub teach_skills: Vec<String>,
    pub learn_skills: Vec<String>,
    pub availability: Json<Vec<AvailabilitySlot>>,
    pub coins: i64,
    pub rating_total: i64,
    pub rating_count: i64,
    pub badges: Vec<String>,
    pub teaching_sessions: i64,
    pub learning_sessions: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Arithmetic mean of every score this user has received
    pub fn rating_avg(&self) -> f64 {
        if self.rating_count <= 0 {
            return 0.0;
        }
        self.rating_total as f64 / self.rating_count as f64
    }

    /// Combined teaching and learning session count
    pub fn total_sessions(&self) -> i64 {
        self.teaching_sessions + self.learning_sessions
    }

    /// Check if the user holds the given badge label
    pub fn has_badge(&self, label: &str) -> bool {
        self.badges.iter().any(|b| b == label)
    }
}

/// Day of week for availability slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// One day of availability, e.g. `Monday: ["10:00-11:00"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: Weekday,
    #[serde(default)]
    pub slots: Vec<String>,
}

/// Fields required to create a user document
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Profile fields overwritten as one unit
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: String,
    pub age: Option<i32>,
    pub city: Option<String>,
    pub teach_skills: Vec<String>,
    pub learn_skills: Vec<String>,
    pub availability: Vec<AvailabilitySlot>,
}

/// Atomic numeric deltas applied to a user document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserIncrement {
    pub coins: i64,
    pub teaching_sessions: i64,
    pub learning_sessions: i64,
    pub rating_total: i64,
    pub rating_count: i64,
}

impl UserIncrement {
    /// One more score received by a ratee
    pub fn rating(score: i32) -> Self {
        Self {
            rating_total: i64::from(score),
            rating_count: 1,
            ..Self::default()
        }
    }

    /// Teacher side of a settled session
    pub fn taught(reward: i64) -> Self {
        Self {
            coins: reward,
            teaching_sessions: 1,
            ..Self::default()
        }
    }

    /// Learner side of a settled session
    pub fn learned(cost: i64) -> Self {
        Self {
            coins: -cost,
            learning_sessions: 1,
            ..Self::default()
        }
    }
}
