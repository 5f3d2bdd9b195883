//! Leaderboard handler implementations

use axum::{extract::State, Json};

use crate::{error::AppResult, services::LeaderboardService, state::AppState};

use super::response::LeaderboardResponse;

/// Users ranked by sessions taught
pub async fn leaderboard(State(state): State<AppState>) -> AppResult<Json<LeaderboardResponse>> {
    let top = LeaderboardService::top(state.store())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(LeaderboardResponse { top }))
}
