//! Request span construction for the trace layer.
//!
//! Credentials must never reach the logs: the `token` header is not recorded
//! and credential-like query values are redacted.

use axum::http::{Request, Uri};
use tower_http::trace::MakeSpan;
use tracing::Span;

use super::auth::TOKEN_HEADER;

/// Query parameter names whose values are redacted
const SENSITIVE_PARAMS: &[&str] = &["token", "password"];

/// `MakeSpan` that records method, redacted URI and whether a token was sent
#[derive(Clone, Debug)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %sanitize_uri(request.uri()),
            authenticated = request.headers().contains_key(TOKEN_HEADER),
        )
    }
}

fn sanitize_uri(uri: &Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let redacted: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE_PARAMS.contains(&key.to_ascii_lowercase().as_str()) => {
                format!("{key}=[REDACTED]")
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", uri.path(), redacted.join("&"))
}
