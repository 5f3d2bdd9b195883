//! Database repositories
//!
//! PostgreSQL implementations of the store traits, one file per collection.

pub mod chat_repo;
pub mod rating_repo;
pub mod session_repo;
pub mod user_repo;
