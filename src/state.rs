//! Application state traits for dependency injection
//!
//! Handlers are generic over `HasServices`, so the same router runs on the
//! production `AppState` and on in-memory test states.

use crate::events::EventPublisher;
use crate::jwt::JwtManager;
use crate::repository::{CompanyRepository, UserRepository};
use crate::service::{CompanyService, UserService};

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The company repository type
    type CompanyRepo: CompanyRepository;
    /// The user repository type
    type UserRepo: UserRepository;
    /// The change notification publisher
    type Publisher: EventPublisher + ?Sized;

    /// Get the company service
    fn company_service(&self) -> &CompanyService<Self::CompanyRepo, Self::Publisher>;

    /// Get the user service
    fn user_service(&self) -> &UserService<Self::UserRepo>;

    /// Get the JWT manager used by the authorization gate
    fn jwt_manager(&self) -> &JwtManager;

    /// Whether backing stores are reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
