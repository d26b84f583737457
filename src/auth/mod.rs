//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Google OAuth authentication (ID-token and authorization-code flows)
//! - JWT token generation and validation
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;


pub use extractors::AuthedUser;
pub use handlers::issue_token;
pub use routes::auth_routes;
