//! Caller identity extraction from the `token` header

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use chrono::Utc;

use crate::error::AppError;
use crate::jwt::{Identity, TokenError};
use crate::state::HasServices;

/// Request header carrying the identity token
pub const TOKEN_HEADER: &str = "token";

/// Authenticated caller, re-derived from the request token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

impl From<Identity> for AuthUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            username: identity.username,
        }
    }
}

/// Read the raw token from the request headers
pub(crate) fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(TOKEN_HEADER)
        .ok_or_else(|| AppError::Unauthorized("Missing token header".to_string()))?;

    value
        .to_str()
        .map_err(|_| AppError::from(TokenError::Malformed("Invalid header encoding".to_string())))
}

/// Extractor for handlers that need the caller's identity.
///
/// ```ignore
/// async fn protected_handler(auth: AuthUser) -> impl IntoResponse {
///     format!("Hello, {}!", auth.username)
/// }
/// ```
impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)?;
        let identity = state.jwt_manager().validate_token(token, Utc::now())?;
        Ok(identity.into())
    }
}
