//! Authentication response DTOs

use serde::Serialize;
use uuid::Uuid;

/// Identity returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
}
