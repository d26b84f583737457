// gigcli/src/dictionary.rs
//! Igbo dictionary lookup
//!
//! Thin client for the Igbo API. The lookup never errors: HTTP failures,
//! malformed JSON, and empty result sets all render the "Not found"
//! placeholder, matching how the search box behaves.

use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::time::Duration;

const NOT_FOUND_WORD: &str = "Not found";

#[derive(Debug, Deserialize, PartialEq)]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default)]
    pub definitions: Vec<String>,
}

impl DictionaryEntry {
    fn not_found() -> Self {
        Self {
            word: NOT_FOUND_WORD.to_string(),
            definitions: Vec::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.word == NOT_FOUND_WORD
    }
}

pub struct DictionaryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl DictionaryClient {
    pub fn from_env() -> Self {
        let base_url =
            env::var("IGBO_API_URL").unwrap_or_else(|_| "https://igboapi.com".to_string());
        let api_key = env::var("IGBO_API_KEY").ok();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Look a term up and return the first matching entry
    pub async fn lookup(&self, term: &str) -> DictionaryEntry {
        let mut request = self
            .http
            .get(format!("{}/api/v1/words", self.base_url))
            .query(&[("keyword", term)]);
        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(_) => return DictionaryEntry::not_found(),
        };
        if !response.status().is_success() {
            return DictionaryEntry::not_found();
        }
        let body = match response.json::<Value>().await {
            Ok(b) => b,
            Err(_) => return DictionaryEntry::not_found(),
        };

        first_entry(&body)
    }
}

/// Pull the first word entry out of the API's response array
pub(crate) fn first_entry(body: &Value) -> DictionaryEntry {
    body.as_array()
        .and_then(|entries| entries.first())
        .and_then(|entry| serde_json::from_value(entry.clone()).ok())
        .unwrap_or_else(DictionaryEntry::not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_entry_reads_word_and_definitions() {
        let body = json!([
            {"word": "mmiri", "definitions": ["water", "rain"]},
            {"word": "mmiri ara", "definitions": ["milk"]}
        ]);
        let entry = first_entry(&body);
        assert_eq!(entry.word, "mmiri");
        assert_eq!(entry.definitions, vec!["water", "rain"]);
    }

    #[test]
    fn test_missing_definitions_default_to_empty() {
        let body = json!([{"word": "mmiri"}]);
        let entry = first_entry(&body);
        assert_eq!(entry.word, "mmiri");
        assert!(entry.definitions.is_empty());
    }

    #[test]
    fn test_empty_results_render_the_placeholder() {
        let entry = first_entry(&json!([]));
        assert!(entry.is_not_found());
        assert_eq!(entry.word, "Not found");
    }

    #[test]
    fn test_unexpected_shapes_render_the_placeholder() {
        // Error object instead of an array
        assert!(first_entry(&json!({"error": "unauthorized"})).is_not_found());
        // Entry without the required word field
        assert!(first_entry(&json!([{"definitions": ["water"]}])).is_not_found());
        // Not JSON structured data at all
        assert!(first_entry(&json!("mmiri")).is_not_found());
    }
}
