//! Envelope normalization for framework-level rejections
//!
//! Unknown routes, wrong methods and other rejections produced outside the
//! handlers come back as plain text. They are rewritten into the
//! `{"code","message","payload"}` envelope with a null payload.

use axum::{
    body::Body,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::ApiResponse;

pub async fn normalize_error_response(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let status = response.status();

    // Probes keep their own plain-text bodies
    if path == "/health" || path == "/ready" {
        return response;
    }

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        return response;
    }

    ApiResponse::<()>::new(status, None).into_response()
}
