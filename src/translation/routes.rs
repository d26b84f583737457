// src/translation/routes.rs

use axum::{routing::post, Router};

use super::handlers;

/// Create the translation router
///
/// # Routes
/// - `POST /api/translate` - Translate text
pub fn translation_routes() -> Router {
    Router::new().route("/api/translate", post(handlers::translate_text))
}
