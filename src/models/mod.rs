//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod badge;
pub mod chat;
pub mod rating;
pub mod session;
pub mod user;

pub use badge::*;
pub use chat::*;
pub use rating::*;
pub use session::*;
pub use user::*;
