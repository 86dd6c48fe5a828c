//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::events::{self, EventPublisher};
use crate::jwt::JwtManager;
use crate::middleware::{
    normalize_error_response, require_auth_middleware, trace::SanitizedMakeSpan,
    AuthMiddlewareState,
};
use crate::repository::{company::CompanyRepositoryImpl, user::UserRepositoryImpl};
use crate::service::{CompanyService, UserService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info, warn, Level};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: MySqlPool,
    pub jwt_manager: JwtManager,
    pub company_service: Arc<CompanyService<CompanyRepositoryImpl, dyn EventPublisher>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
}

impl HasServices for AppState {
    type CompanyRepo = CompanyRepositoryImpl;
    type UserRepo = UserRepositoryImpl;
    type Publisher = dyn EventPublisher;

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
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let publisher = events::connect(&config.events).await?;

    // Create repositories
    let company_repo = Arc::new(CompanyRepositoryImpl::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));

    let jwt_manager = JwtManager::new(config.jwt.clone());

    // Create services
    let company_service = Arc::new(CompanyService::new(company_repo, publisher));
    let user_service = Arc::new(UserService::new(user_repo, jwt_manager.clone()));

    let addr = config.http_addr();
    let state = AppState {
        db_pool,
        jwt_manager,
        company_service,
        user_service,
    };

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server started on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Build the HTTP router with generic state type
///
/// Generic over `HasServices` so tests can drive the production routes with
/// in-memory repositories.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_state = AuthMiddlewareState::new(state.jwt_manager().clone());

    let protected = Router::new()
        .route(
            "/company",
            get(api::company::get_company::<S>).delete(api::company::delete_company::<S>),
        )
        .route("/company/create", post(api::company::create_company::<S>))
        .route("/company/update", patch(api::company::update_company::<S>))
        .route("/companies", post(api::company::list_companies::<S>))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            require_auth_middleware,
        ));

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Authentication
        .route("/sign-up", post(api::auth::sign_up::<S>))
        .route("/sign-in", post(api::auth::sign_in::<S>))
        .merge(protected)
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(SanitizedMakeSpan)
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(cors)
        .with_state(state)
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
