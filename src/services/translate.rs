// src/services/translate.rs
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Translation API key not configured")]
    NotConfigured,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
struct TranslateApiRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateApiResponse {
    data: TranslationsData,
}

#[derive(Debug, Deserialize)]
struct TranslationsData {
    translations: Vec<TranslatedItem>,
}

#[derive(Debug, Deserialize)]
struct TranslatedItem {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Thin wrapper over the cloud translation REST API (v2 surface).
///
/// Forwards text + target language and hands back the first translated
/// string; nothing is cached or post-processed.
#[derive(Debug)]
pub struct TranslationService {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl TranslationService {
    pub fn new(api_key: Option<String>, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            base_url,
            client,
        }
    }

    /// Translate text into the target language, returning the first result
    pub async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(TranslationError::NotConfigured)?;

        let request = TranslateApiRequest {
            q: text,
            target,
            // Plain text in, plain text out - the default is HTML-escaped
            format: "text",
        };

        debug!(target = %target, "Forwarding text to translation API");

        let response = self
            .client
            .post(format!("{}/language/translate/v2", self.base_url))
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP error contacting translation API");
                TranslationError::RequestFailed(e.to_string())
            })?;

        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(http_status = %http_status, body = %body, "Translation API returned error");
            return Err(TranslationError::RequestFailed(format!(
                "translation API returned {}",
                http_status
            )));
        }

        let parsed = response.json::<TranslateApiResponse>().await.map_err(|e| {
            error!(error = %e, "Failed to parse translation API response");
            TranslationError::InvalidResponse(e.to_string())
        })?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| TranslationError::InvalidResponse("empty translations".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_service_refuses_calls() {
        let service = TranslationService::new(None, "https://translation.googleapis.com".to_string());
        let result = service.translate("hello", "fr").await;
        assert!(matches!(result, Err(TranslationError::NotConfigured)));
    }

    #[test]
    fn test_response_parsing_takes_first_translation() {
        let body = r#"{
            "data": {
                "translations": [
                    {"translatedText": "bonjour"},
                    {"translatedText": "salut"}
                ]
            }
        }"#;
        let parsed: TranslateApiResponse = serde_json::from_str(body).expect("Parse failed");
        let first = parsed.data.translations.into_iter().next().expect("empty");
        assert_eq!(first.translated_text, "bonjour");
    }
}
