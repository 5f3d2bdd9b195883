//! Matchmaking response DTOs

use serde::Serialize;
use uuid::Uuid;

/// A candidate with a mutual skill overlap
#[derive(Debug, Clone, Serialize)]
pub struct SkillMatch {
    pub user_id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub age: Option<i32>,
    pub teach_skills: Vec<String>,
    pub learn_skills: Vec<String>,
    /// What they can teach me
    pub match_for_me: Vec<String>,
    /// What I can teach them
    pub match_for_them: Vec<String>,
    pub rating_avg: f64,
}

/// Match list response
#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<SkillMatch>,
}
