//! Session handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::OkResponse,
    services::{SessionService, SettlementService},
    state::AppState,
};

use super::{
    request::{RatingRequest, ScheduleRequest},
    response::{ScheduleResponse, SessionsResponse},
};

/// Schedule a teaching session
pub async fn schedule_session(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleRequest>,
) -> AppResult<Json<ScheduleResponse>> {
    let session_id = SessionService::schedule(state.store(), payload.into()).await?;
    Ok(Json(ScheduleResponse { session_id }))
}

/// List sessions a user teaches or attends
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<SessionsResponse>> {
    let sessions = SessionService::list_for_user(state.store(), &user_id).await?;
    Ok(Json(SessionsResponse { sessions }))
}

/// Rate a session, settling coins, counters and badges
pub async fn rate_session(
    State(state): State<AppState>,
    Json(payload): Json<RatingRequest>,
) -> AppResult<Json<OkResponse>> {
    SettlementService::submit_rating(state.store(), payload.into()).await?;
    Ok(Json(OkResponse::ok()))
}
