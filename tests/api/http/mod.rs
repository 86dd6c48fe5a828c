//! HTTP API Handler Tests Infrastructure
//!
//! - `TestAppState` implements `HasServices` over the in-memory repositories
//! - The production `build_router()` is used so real handlers and middleware run
//! - Request helpers return the status and the decoded envelope

pub mod auth_http_test;

use crate::api::{
    create_test_jwt_manager, RecordingEventPublisher, TestCompanyRepository,
    TestUserRepository,
};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use company_registry::jwt::JwtManager;
use company_registry::middleware::TOKEN_HEADER;
use company_registry::server::build_router;
use company_registry::service::{CompanyService, UserService};
use company_registry::state::HasServices;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test Application State
// ============================================================================

#[derive(Clone)]
pub struct TestAppState {
    pub jwt_manager: JwtManager,
    pub company_service: Arc<CompanyService<TestCompanyRepository, RecordingEventPublisher>>,
    pub user_service: Arc<UserService<TestUserRepository>>,
    pub company_repo: Arc<TestCompanyRepository>,
    pub user_repo: Arc<TestUserRepository>,
    pub publisher: Arc<RecordingEventPublisher>,
}

impl TestAppState {
    pub fn new() -> Self {
        let company_repo = Arc::new(TestCompanyRepository::new());
        let user_repo = Arc::new(TestUserRepository::new());
        let publisher = Arc::new(RecordingEventPublisher::new());
        let jwt_manager = create_test_jwt_manager();

        Self {
            jwt_manager: jwt_manager.clone(),
            company_service: Arc::new(CompanyService::new(
                company_repo.clone(),
                publisher.clone(),
            )),
            user_service: Arc::new(UserService::new(user_repo.clone(), jwt_manager)),
            company_repo,
            user_repo,
            publisher,
        }
    }
}

impl Default for TestAppState {
    fn default() -> Self {
        Self::new()
    }
}

impl HasServices for TestAppState {
    type CompanyRepo = TestCompanyRepository;
    type UserRepo = TestUserRepository;
    type Publisher = RecordingEventPublisher;

    fn company_service(&self) -> &CompanyService<Self::CompanyRepo, Self::Publisher> {
        &self.company_service
    }

    fn user_service(&self) -> &UserService<Self::UserRepo> {
        &self.user_service
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    async fn check_ready(&self) -> bool {
        true
    }
}

pub fn build_test_router(state: TestAppState) -> Router {
    build_router(state)
}

// ============================================================================
// HTTP Test Helpers
// ============================================================================

/// Send a request and decode the response body as JSON (`Value::Null` if not JSON)
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Body>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    if body.is_some() {
        builder = builder.header("Content-Type", "application/json");
    }
    let request = builder.body(body.unwrap_or_else(Body::empty)).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    (
        status,
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null),
    )
}

pub async fn get_json(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, path, token, None).await
}

pub async fn post_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: &Value,
) -> (StatusCode, Value) {
    send(app, Method::POST, path, token, Some(Body::from(body.to_string()))).await
}

pub async fn patch_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: &Value,
) -> (StatusCode, Value) {
    send(app, Method::PATCH, path, token, Some(Body::from(body.to_string()))).await
}

pub async fn delete_json(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::DELETE, path, token, None).await
}

/// POST a raw (possibly invalid) JSON body
pub async fn post_raw(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    send(app, Method::POST, path, token, Some(Body::from(body))).await
}
