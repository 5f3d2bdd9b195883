//! Database module
//!
//! This module holds the document store contract and its backends:
//! PostgreSQL (connection, migrations, repositories) and an in-memory store.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

use sqlx::PgPool;

pub use connection::*;
pub use memory::MemoryStore;
pub use store::*;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
