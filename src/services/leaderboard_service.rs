//! Leaderboard service

use crate::{constants::LEADERBOARD_SIZE, db::UserStore, error::AppResult, models::User};

/// Leaderboard service
pub struct LeaderboardService;

impl LeaderboardService {
    /// Users who taught the most sessions
    pub async fn top<S>(store: &S) -> AppResult<Vec<User>>
    where
        S: UserStore + ?Sized,
    {
        Ok(store.top_teachers(LEADERBOARD_SIZE).await?)
    }
}
