//! REST API handlers and the shared response envelope

pub mod auth;
pub mod company;
pub mod health;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Response envelope used by every endpoint.
///
/// `code` mirrors the HTTP status and `message` is its reason phrase.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, payload: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
            payload,
        }
    }

    pub fn ok(payload: T) -> Self {
        Self::new(StatusCode::OK, Some(payload))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
