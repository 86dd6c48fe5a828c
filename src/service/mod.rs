//! Business logic layer

pub mod company;
pub mod user;

pub use company::CompanyService;
pub use user::UserService;
