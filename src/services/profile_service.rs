//! Profile service

use uuid::Uuid;

use crate::{
    constants::{MAX_USER_AGE, MIN_USER_AGE},
    db::{RatingStore, UserStore},
    error::{AppError, AppResult},
    models::{ProfileUpdate, Rating, User},
};

/// Profile service for business logic
pub struct ProfileService;

impl ProfileService {
    /// Get user by ID
    pub async fn get_profile<S>(store: &S, id: &Uuid) -> AppResult<User>
    where
        S: UserStore + ?Sized,
    {
        store
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Overwrite the editable profile fields and return the fresh document
    pub async fn update_profile<S>(store: &S, id: &Uuid, update: ProfileUpdate) -> AppResult<User>
    where
        S: UserStore + ?Sized,
    {
        if let Some(age) = update.age {
            if !(MIN_USER_AGE..=MAX_USER_AGE).contains(&age) {
                return Err(AppError::Validation(format!(
                    "Age must be between {MIN_USER_AGE} and {MAX_USER_AGE}"
                )));
            }
        }

        if !store.update_profile(id, &update).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::debug!(user_id = %id, "Profile updated");

        Self::get_profile(store, id).await
    }

    /// Ratings a user has received, oldest first
    pub async fn ratings_received<S>(store: &S, id: &Uuid) -> AppResult<(User, Vec<Rating>)>
    where
        S: UserStore + RatingStore + ?Sized,
    {
        let user = Self::get_profile(store, id).await?;
        let ratings = store.ratings_for_ratee(id).await?;
        Ok((user, ratings))
    }
}
