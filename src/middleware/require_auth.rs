//! Authorization gate for protected routes
//!
//! Validates the token in the `token` header and either rejects the request
//! or forwards it unchanged. The decoded identity is not attached to the
//! request; handlers use the `AuthUser` extractor when they need it.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::auth::extract_token;
use crate::error::AppError;
use crate::jwt::JwtManager;

/// Shared state for the authorization gate
#[derive(Clone)]
pub struct AuthMiddlewareState {
    jwt_manager: JwtManager,
}

impl AuthMiddlewareState {
    pub fn new(jwt_manager: JwtManager) -> Self {
        Self { jwt_manager }
    }
}

/// Missing token, bad signature and expiry are 401; a malformed token is 400.
pub async fn require_auth_middleware(
    State(auth_state): State<AuthMiddlewareState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let token = match extract_token(request.headers()) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    if let Err(e) = auth_state.jwt_manager.validate_token(token, Utc::now()) {
        tracing::debug!("Rejected request token: {}", e);
        return AppError::from(e).into_response();
    }

    next.run(request).await
}
