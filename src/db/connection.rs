//! Database connection management

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{config::DatabaseConfig, constants::backends};

use super::store::{Store, StoreInfo, StoreResult};

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Test database connection
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// PostgreSQL-backed document store
///
/// Each collection is a table; every trait method issues exactly one
/// statement, so per-document atomicity comes from Postgres itself.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn describe(&self) -> StoreResult<StoreInfo> {
        test_connection(&self.pool).await?;

        let collections: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT table_name::text FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name NOT LIKE '\_sqlx%'
            ORDER BY table_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(StoreInfo {
            backend: backends::POSTGRES,
            collections,
        })
    }
}
