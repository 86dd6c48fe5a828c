//! HTTP middleware for the Company Registry
//!
//! - `token` header authorization gate and `AuthUser` extractor
//! - Sanitized request spans for the trace layer
//! - Envelope normalization for framework rejections

pub mod auth;
pub mod error_response;
pub mod require_auth;
pub mod trace;

pub use auth::{AuthUser, TOKEN_HEADER};
pub use error_response::normalize_error_response;
pub use require_auth::{require_auth_middleware, AuthMiddlewareState};
