//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// PROFILE LIMITS
// =============================================================================

/// Youngest age a profile may declare
pub const MIN_USER_AGE: i32 = 13;

/// Oldest age a profile may declare
pub const MAX_USER_AGE: i32 = 120;

/// Maximum display name length
pub const MAX_NAME_LENGTH: u64 = 100;

/// Maximum password length accepted at registration
pub const MAX_PASSWORD_LENGTH: u64 = 128;

// =============================================================================
// COIN ECONOMY
// =============================================================================

/// Coins granted to every newly registered user
pub const STARTING_COINS: i64 = 20;

/// Coins moved from learner to teacher per settled session
pub const SESSION_REWARD_COINS: i64 = 10;

/// Lowest accepted rating score
pub const MIN_RATING_SCORE: i32 = 1;

/// Highest accepted rating score
pub const MAX_RATING_SCORE: i32 = 5;

// =============================================================================
// BADGE THRESHOLDS
// =============================================================================

/// Teaching sessions needed for "Top Mentor"
pub const TOP_MENTOR_TEACHING_SESSIONS: i64 = 10;

/// Combined teaching + learning sessions needed for "Skill Streak"
pub const SKILL_STREAK_TOTAL_SESSIONS: i64 = 5;

/// Rating average that must be exceeded for "Helpful Teacher"
pub const HELPFUL_TEACHER_MIN_AVG: f64 = 4.5;

// =============================================================================
// LISTING DEFAULTS
// =============================================================================

/// Number of users shown on the leaderboard
pub const LEADERBOARD_SIZE: i64 = 20;

/// Default number of chat messages returned
pub const DEFAULT_MESSAGE_LIMIT: i64 = 100;

/// Upper bound on chat messages returned in one call
pub const MAX_MESSAGE_LIMIT: i64 = 500;

/// Allowed session durations in minutes
pub const SESSION_DURATIONS: [i32; 2] = [30, 60];

// =============================================================================
// STORE BACKENDS
// =============================================================================

/// Store backend identifiers
pub mod backends {
    pub const POSTGRES: &str = "postgres";
    pub const MEMORY: &str = "memory";
}

/// Logical collection names, as reported by the diagnostics endpoint
pub mod collections {
    pub const USER: &str = "user";
    pub const SESSION: &str = "session";
    pub const RATING: &str = "rating";
    pub const CHAT: &str = "chat";
    pub const MESSAGE: &str = "message";

    pub const ALL: &[&str] = &[USER, SESSION, RATING, CHAT, MESSAGE];
}
