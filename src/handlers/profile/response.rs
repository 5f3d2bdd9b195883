//! Profile response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{AvailabilitySlot, Rating, User};

/// Full user profile
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub city: Option<String>,
    pub teach_skills: Vec<String>,
    pub learn_skills: Vec<String>,
    pub availability: Vec<AvailabilitySlot>,
    pub coins: i64,
    pub rating_avg: f64,
    pub rating_count: i64,
    pub badges: Vec<String>,
    pub teaching_sessions: i64,
    pub learning_sessions: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        let rating_avg = user.rating_avg();
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            age: user.age,
            city: user.city,
            teach_skills: user.teach_skills,
            learn_skills: user.learn_skills,
            availability: user.availability.0,
            coins: user.coins,
            rating_avg,
            rating_count: user.rating_count,
            badges: user.badges,
            teaching_sessions: user.teaching_sessions,
            learning_sessions: user.learning_sessions,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Ratings a user has received
#[derive(Debug, Serialize)]
pub struct RatingsResponse {
    pub user_id: Uuid,
    pub rating_avg: f64,
    pub rating_count: i64,
    pub ratings: Vec<Rating>,
}
