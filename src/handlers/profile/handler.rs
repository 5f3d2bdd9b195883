//! Profile handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppResult, services::ProfileService, state::AppState};

use super::{
    request::UpdateProfileRequest,
    response::{ProfileResponse, RatingsResponse},
};

/// Get a user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ProfileResponse>> {
    let user = ProfileService::get_profile(state.store(), &user_id).await?;
    Ok(Json(user.into()))
}

/// Overwrite a user's profile
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    // Validate request
    payload.validate()?;

    let user = ProfileService::update_profile(state.store(), &user_id, payload.into()).await?;
    Ok(Json(user.into()))
}

/// List ratings a user has received
pub async fn get_ratings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<RatingsResponse>> {
    let (user, ratings) = ProfileService::ratings_received(state.store(), &user_id).await?;

    Ok(Json(RatingsResponse {
        user_id: user.id,
        rating_avg: user.rating_avg(),
        rating_count: user.rating_count,
        ratings,
    }))
}
