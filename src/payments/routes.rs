// src/payments/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the payments router
///
/// # Routes
/// - `POST /api/payments/init` - Initialize a gateway transaction
/// - `GET /api/payments/verify/:reference` - Verify by reference
pub fn payments_routes() -> Router {
    Router::new()
        .route("/api/payments/init", post(handlers::init_payment))
        .route(
            "/api/payments/verify/:reference",
            get(handlers::verify_payment),
        )
}
