//! Leaderboard response DTOs

use serde::Serialize;

use crate::handlers::profile::ProfileResponse;

/// Top teachers
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub top: Vec<ProfileResponse>,
}
