//! # Users Module
//!
//! This module handles account functionality including:
//! - Local registration and login (bcrypt passwords)
//! - The authenticated /api/me endpoint
//! - The admin-only user listing

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::User;
pub use routes::users_routes;
