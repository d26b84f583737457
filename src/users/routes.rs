// src/users/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the users router
///
/// # Routes
/// - `POST /api/users/register` - Local account registration
/// - `POST /api/users/login` - Local account login
/// - `GET /api/users` - List users (admin only)
/// - `GET /api/me` - Current user information
pub fn users_routes() -> Router {
    Router::new()
        .route("/api/users/register", post(handlers::register_user))
        .route("/api/users/login", post(handlers::login_user))
        .route("/api/users", get(handlers::list_users))
        .route("/api/me", get(handlers::me_handler))
}
