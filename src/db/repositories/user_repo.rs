//! User repository

use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    constants::STARTING_COINS,
    db::{
        connection::PgStore,
        store::{StoreResult, UserStore},
    },
    models::{Badge, NewUser, ProfileUpdate, User, UserIncrement},
};

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, password_hash, coins)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(STARTING_COINS)
        .fetch_one(self.pool())
        .await?;

        Ok(id)
    }

    async fn find_user(&self, id: &Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(self.pool())
            .await?;

        Ok(user)
    }

    async fn update_profile(&self, id: &Uuid, profile: &ProfileUpdate) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                name = $2,
                age = $3,
                city = $4,
                teach_skills = $5,
                learn_skills = $6,
                availability = $7,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(profile.age)
        .bind(&profile.city)
        .bind(&profile.teach_skills)
        .bind(&profile.learn_skills)
        .bind(Json(&profile.availability))
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_user(&self, id: &Uuid, delta: UserIncrement) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                coins = coins + $2,
                teaching_sessions = teaching_sessions + $3,
                learning_sessions = learning_sessions + $4,
                rating_total = rating_total + $5,
                rating_count = rating_count + $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(delta.coins)
        .bind(delta.teaching_sessions)
        .bind(delta.learning_sessions)
        .bind(delta.rating_total)
        .bind(delta.rating_count)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_badges(&self, id: &Uuid, badges: &[Badge]) -> StoreResult<bool> {
        let labels: Vec<String> = badges.iter().map(|b| b.label().to_string()).collect();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET badges = ARRAY(
                SELECT DISTINCT b FROM unnest(badges || $2::text[]) AS b ORDER BY b
            )
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&labels)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_users_except(&self, id: &Uuid) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE id <> $1 ORDER BY created_at"#,
        )
        .bind(id)
        .fetch_all(self.pool())
        .await?;

        Ok(users)
    }

    async fn top_teachers(&self, limit: i64) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            ORDER BY teaching_sessions DESC, created_at
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(users)
    }
}
