//! User repository

use super::{StoreError, StoreResult};
use crate::domain::User;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken username yields `UniqueViolation`
    async fn create(&self, username: &str, password_hash: &str) -> StoreResult<User>;
    async fn find_by_username(&self, username: &str) -> StoreResult<User>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at, updated_at)
            VALUES (?, ?, NOW(), NOW())
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(result.last_insert_id() as i64)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at, updated_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(StoreError::NoRows)
    }
}
