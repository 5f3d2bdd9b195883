//! Session response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::Session;

/// Scheduled session id
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub session_id: Uuid,
}

/// Sessions of a user
#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Session>,
}
