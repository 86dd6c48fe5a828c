//! Domain models for the Company Registry

pub mod company;
pub mod user;

pub use company::*;
pub use user::*;
