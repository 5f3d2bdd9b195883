//! Authentication handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{error::AppResult, services::AuthService, state::AppState};

use super::{
    request::{LoginRequest, RegisterRequest},
    response::AuthResponse,
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Validate request
    payload.validate()?;

    let user = AuthService::register(state.store(), &payload.email, &payload.password).await?;

    Ok(Json(AuthResponse {
        user_id: user.id,
        email: user.email,
    }))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Validate request
    payload.validate()?;

    let user = AuthService::login(state.store(), &payload.email, &payload.password).await?;

    Ok(Json(AuthResponse {
        user_id: user.id,
        email: user.email,
    }))
}
