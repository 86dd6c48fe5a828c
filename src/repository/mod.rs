//! Data access layer (Repository pattern)

pub mod company;
pub mod user;

pub use company::CompanyRepository;
pub use user::UserRepository;

use thiserror::Error;

/// Storage-level failures, before any business mapping
#[derive(Error, Debug)]
pub enum StoreError {
    /// The statement matched no (active) rows
    #[error("no rows in result set")]
    NoRows,

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NoRows,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::UniqueViolation(db.message().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}
