//! Unified error handling for the Company Registry

use crate::api::ApiResponse;
use crate::jwt::TokenError;
use crate::repository::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) | AppError::AlreadyExists(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Redis(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Client-fault messages are returned to the caller; everything else
        // is logged here and reported with a null payload.
        let payload = match self {
            AppError::BadRequest(msg) | AppError::Validation(msg) | AppError::AlreadyExists(msg) => {
                Some(msg)
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                None
            }
            AppError::Unauthorized(msg) => {
                tracing::debug!("Unauthorized: {}", msg);
                None
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                None
            }
            AppError::Redis(e) => {
                tracing::error!("Redis error: {:?}", e);
                None
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                None
            }
        };

        ApiResponse::new(status, payload).into_response()
    }
}

/// Storage errors that reach this conversion were not mapped by a manager,
/// so they are unexpected by definition.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::Database(e),
            other => AppError::Internal(anyhow::anyhow!(other)),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed(msg) => AppError::BadRequest(msg),
            TokenError::SignatureInvalid | TokenError::Expired => {
                AppError::Unauthorized(err.to_string())
            }
        }
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
