//! Rating repository

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::{
        connection::PgStore,
        store::{RatingStore, StoreResult},
    },
    models::{NewRating, Rating},
};

#[async_trait]
impl RatingStore for PgStore {
    async fn insert_rating(&self, rating: NewRating) -> StoreResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO ratings (session_id, rater_id, ratee_id, score, feedback)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(rating.session_id)
        .bind(rating.rater_id)
        .bind(rating.ratee_id)
        .bind(rating.score)
        .bind(&rating.feedback)
        .fetch_one(self.pool())
        .await?;

        Ok(id)
    }

    async fn ratings_for_ratee(&self, ratee_id: &Uuid) -> StoreResult<Vec<Rating>> {
        let ratings = sqlx::query_as::<_, Rating>(
            r#"SELECT * FROM ratings WHERE ratee_id = $1 ORDER BY created_at"#,
        )
        .bind(ratee_id)
        .fetch_all(self.pool())
        .await?;

        Ok(ratings)
    }
}
