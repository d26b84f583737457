//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/google` - Google OAuth authentication (ID token)
/// - `GET /api/auth/google` - Start the authorization-code flow
/// - `GET /api/auth/google/callback` - OAuth callback, redirects to frontend
/// - `POST /api/auth/logout` - Logout (client-side token removal)
pub fn auth_routes() -> Router {
    Router::new()
        .route(
            "/api/auth/google",
            get(handlers::google_oauth_start).post(handlers::google_auth),
        )
        .route(
            "/api/auth/google/callback",
            get(handlers::google_oauth_callback),
        )
        .route("/api/auth/logout", post(handlers::logout_handler))
}
