//! User registration and sign-in

use crate::crypto;
use crate::domain::{Credentials, User, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, Result};
use crate::jwt::{Identity, JwtManager};
use crate::repository::{StoreError, UserRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;

const INCORRECT_CREDENTIALS: &str = "incorrect username or password";

pub struct UserService<U: UserRepository> {
    repo: Arc<U>,
    jwt_manager: JwtManager,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repo: Arc<U>, jwt_manager: JwtManager) -> Self {
        Self { repo, jwt_manager }
    }

    /// Store a user; a taken username becomes `AlreadyExists`
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        self.repo
            .create(username, password_hash)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => {
                    AppError::AlreadyExists("already registered".to_string())
                }
                other => other.into(),
            })
    }

    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        self.repo
            .find_by_username(username)
            .await
            .map_err(|e| match e {
                StoreError::NoRows => AppError::NotFound(format!("User '{}' not found", username)),
                other => other.into(),
            })
    }

    pub async fn sign_up(&self, credentials: Credentials) -> Result<User> {
        if credentials.username.is_empty() {
            return Err(AppError::Validation("no username provided".to_string()));
        }
        if credentials.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "password minimum length should be at least {}",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password = credentials.password;
        let password_hash = tokio::task::spawn_blocking(move || crypto::hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

        let user = self.create(&credentials.username, &password_hash).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue an identity token valid from `now`
    pub async fn sign_in(&self, credentials: Credentials, now: DateTime<Utc>) -> Result<String> {
        if credentials.username.is_empty() {
            return Err(AppError::Validation("no username provided".to_string()));
        }

        let user = match self.get_by_username(&credentials.username).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::BadRequest(INCORRECT_CREDENTIALS.to_string()))
            }
            Err(e) => return Err(e),
        };

        let password = credentials.password;
        let hash = user.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || crypto::verify_password(&password, &hash))
                .await
                .map_err(|e| AppError::Internal(e.into()))??;
        if !verified {
            return Err(AppError::BadRequest(INCORRECT_CREDENTIALS.to_string()));
        }

        let identity = Identity {
            user_id: user.id,
            username: user.username,
        };
        self.jwt_manager.issue_token(&identity, now)
    }
}
