//! Authentication service
//!
//! Registration and login only; no tokens are issued. Callers identify
//! themselves with the returned user id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    db::{StoreError, UserStore},
    error::{AppError, AppResult},
    models::{NewUser, User},
};

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user with starting coins and empty profile
    pub async fn register<S>(store: &S, email: &str, password: &str) -> AppResult<User>
    where
        S: UserStore + ?Sized,
    {
        if store.find_user_by_email(email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let password_hash = Self::hash_password(password)?;

        let id = store
            .insert_user(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // lost a race with a concurrent registration
                StoreError::Duplicate(_) => {
                    AppError::AlreadyExists("Email already registered".to_string())
                }
                other => other.into(),
            })?;

        tracing::info!(user_id = %id, "User registered");

        store
            .find_user(&id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Registered user {id} vanished")))
    }

    /// Login with email and password
    pub async fn login<S>(store: &S, email: &str, password: &str) -> AppResult<User>
    where
        S: UserStore + ?Sized,
    {
        let user = store
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
