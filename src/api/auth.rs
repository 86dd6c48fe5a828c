//! Registration and sign-in endpoints

use crate::api::ApiResponse;
use crate::domain::Credentials;
use crate::error::{AppError, Result};
use crate::state::HasServices;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;

/// POST /sign-up
pub async fn sign_up<S: HasServices>(
    State(state): State<S>,
    body: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<ApiResponse<&'static str>> {
    let Json(credentials) =
        body.map_err(|_| AppError::BadRequest("bad credentials".to_string()))?;

    state.user_service().sign_up(credentials).await?;
    Ok(ApiResponse::ok("sign up completed"))
}

/// POST /sign-in; the payload is the signed identity token
pub async fn sign_in<S: HasServices>(
    State(state): State<S>,
    body: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<ApiResponse<String>> {
    let Json(credentials) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let username = credentials.username.clone();
    let token = state
        .user_service()
        .sign_in(credentials, Utc::now())
        .await?;

    tracing::info!(username = %username, "User signed in");
    Ok(ApiResponse::ok(token))
}
