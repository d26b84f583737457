// src/translation/handlers.rs

use axum::{extract::Extension, response::Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::common::{ApiError, AppState};
use crate::services::translate::TranslationError;
use crate::translation::models::*;

/// POST /api/translate - Translate text via the cloud translation API
///
/// # Request Body
/// ```json
/// {
///   "text": "hello",
///   "targetLanguage": "fr"
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "translation": "bonjour"
/// }
/// ```
pub async fn translate_text(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    // Shallow presence checks only - this endpoint is a passthrough
    let text = match request.text.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            warn!("Translation request missing text");
            return Err(ApiError::BadRequest("text is required".to_string()));
        }
    };
    let target = match request.target_language.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            warn!("Translation request missing target language");
            return Err(ApiError::BadRequest(
                "targetLanguage is required".to_string(),
            ));
        }
    };

    let translation = state
        .translation_service
        .translate(&text, &target)
        .await
        .map_err(|e| match e {
            TranslationError::NotConfigured => {
                ApiError::InternalServer("translation service not configured".to_string())
            }
            TranslationError::RequestFailed(msg) | TranslationError::InvalidResponse(msg) => {
                ApiError::Upstream(msg)
            }
        })?;

    debug!(target = %target, "Translation completed");

    Ok(Json(TranslateResponse { translation }))
}
