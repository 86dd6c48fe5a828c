//! Company Registry - token-guarded company lifecycle backend
//!
//! This crate provides user registration and sign-in, a JWT authorization
//! gate, and the company store/manager pair with soft-delete semantics and
//! change notifications over Redis pub/sub.

pub mod api;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod events;
pub mod jwt;
pub mod middleware;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
