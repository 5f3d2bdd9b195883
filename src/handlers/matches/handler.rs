//! Matchmaking handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{error::AppResult, services::MatchService, state::AppState};

use super::response::MatchesResponse;

/// Find users with a mutual teach/learn overlap
pub async fn find_matches(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<MatchesResponse>> {
    let matches = MatchService::find_matches(state.store(), &user_id).await?;
    Ok(Json(MatchesResponse { matches }))
}
