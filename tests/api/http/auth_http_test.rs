//! Sign-up / Sign-in HTTP Handler Tests

use super::{build_test_router, post_json, post_raw, TestAppState};
use axum::http::StatusCode;
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

fn credentials(username: &str, password: &str) -> serde_json::Value {
    json!({"username": username, "password": password})
}

// ============================================================================
// Sign-up
// ============================================================================

#[tokio::test]
async fn test_sign_up_success() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body) = post_json(&app, "/sign-up", None, &credentials("alice", "password123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": 200, "message": "OK", "payload": "sign up completed"})
    );

    let stored = state.user_repo.find("alice").await.unwrap();
    assert_ne!(stored.password_hash, "password123");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_sign_up_validation() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = post_json(&app, "/sign-up", None, &credentials("", "password123")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["payload"], "no username provided");

    let (status, body) = post_json(&app, "/sign-up", None, &credentials("alice", "1234567")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["payload"], "password minimum length should be at least 8");
}

#[tokio::test]
async fn test_sign_up_undecodable_body() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = post_raw(&app, "/sign-up", None, "{\"username\": 42").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["payload"], "bad credentials");
}

#[tokio::test]
async fn test_sign_up_duplicate_username() {
    let app = build_test_router(TestAppState::new());

    let (status, _) = post_json(&app, "/sign-up", None, &credentials("alice", "password123")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, "/sign-up", None, &credentials("alice", "otherpass99")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"code": 400, "message": "Bad Request", "payload": "already registered"})
    );
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
async fn test_sign_in_token_opens_gate() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    post_json(&app, "/sign-up", None, &credentials("alice", "password123")).await;

    let (status, body) = post_json(&app, "/sign-in", None, &credentials("alice", "password123")).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["payload"].as_str().unwrap().to_string();

    let identity = state.jwt_manager.validate_token(&token, Utc::now()).unwrap();
    assert_eq!(identity.username, "alice");

    let (status, _) = post_json(
        &app,
        "/company/create",
        Some(&token),
        &json!({
            "name": "Acme",
            "code": "AC",
            "country": "US",
            "website": "acme.io",
            "phone": "1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = build_test_router(TestAppState::new());

    post_json(&app, "/sign-up", None, &credentials("alice", "password123")).await;

    let (status, body) = post_json(&app, "/sign-in", None, &credentials("alice", "password124")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["payload"], "incorrect username or password");
}

#[tokio::test]
async fn test_sign_in_unknown_user() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = post_json(&app, "/sign-in", None, &credentials("ghost", "password123")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["payload"], "incorrect username or password");
}

#[tokio::test]
async fn test_sign_in_requires_username() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = post_json(&app, "/sign-in", None, &json!({"password": "password123"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["payload"], "no username provided");
}
