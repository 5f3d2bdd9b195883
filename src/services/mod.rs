//! Business logic services

pub mod auth_service;
pub mod chat_service;
pub mod leaderboard_service;
pub mod match_service;
pub mod profile_service;
pub mod session_service;
pub mod settlement_service;

pub use auth_service::AuthService;
pub use chat_service::ChatService;
pub use leaderboard_service::LeaderboardService;
pub use match_service::MatchService;
pub use profile_service::ProfileService;
pub use session_service::SessionService;
pub use settlement_service::{RatingSubmission, SettlementError, SettlementService, SettlementStep};
