// src/translation/models.rs

use serde::{Deserialize, Serialize};

/// Wire names are camelCase to match the frontend contract
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
    #[serde(rename = "targetLanguage")]
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translation: String,
}
