// gigcli/src/api.rs
//! Typed client for the marketplace API
//!
//! One wrapper method per backend endpoint. Every request is built through
//! [`ApiClient::request`], which injects the stored bearer token when one is
//! present and leaves the header off otherwise. No retries, no caching.

use anyhow::{bail, Context, Result};
use reqwest::Method;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

use crate::token_store::TokenStore;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("GIG_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        Ok(Self::with_parts(base_url, TokenStore::from_env()))
    }

    pub fn with_parts(base_url: String, tokens: TokenStore) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Single chokepoint for outgoing requests: attaches the stored bearer
    /// token when present, omits the Authorization header when absent
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.tokens.load() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and surface the server's `error` field on failure
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Value> {
        let response = builder.send().await.context("request failed")?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("request failed");
            bail!("{} ({})", message, status);
        }

        Ok(body)
    }

    // ---- Accounts ----

    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> Result<Value> {
        let body = self
            .send(self.request(Method::POST, "/api/users/register").json(&json!({
                "full_name": full_name,
                "email": email,
                "password": password,
            })))
            .await?;
        self.store_session_token(&body)?;
        Ok(body)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Value> {
        let body = self
            .send(self.request(Method::POST, "/api/users/login").json(&json!({
                "email": email,
                "password": password,
            })))
            .await?;
        self.store_session_token(&body)?;
        Ok(body)
    }

    pub async fn logout(&self) -> Result<()> {
        // Best-effort server acknowledgement; the token removal is what counts
        let _ = self.send(self.request(Method::POST, "/api/auth/logout")).await;
        self.tokens.clear()
    }

    pub async fn me(&self) -> Result<Value> {
        self.send(self.request(Method::GET, "/api/me")).await
    }

    pub async fn list_users(&self) -> Result<Value> {
        self.send(self.request(Method::GET, "/api/users")).await
    }

    // ---- Jobs ----

    pub async fn list_jobs(&self, page: usize, limit: usize) -> Result<Value> {
        self.send(
            self.request(Method::GET, "/api/jobs")
                .query(&[("page", page), ("limit", limit)]),
        )
        .await
    }

    pub async fn get_job(&self, id: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &format!("/api/jobs/{}", id)))
            .await
    }

    pub async fn create_job(&self, payload: Value) -> Result<Value> {
        self.send(self.request(Method::POST, "/api/jobs").json(&payload))
            .await
    }

    // ---- Payments ----

    pub async fn init_payment(
        &self,
        amount: i64,
        currency: &str,
        job_id: Option<&str>,
    ) -> Result<Value> {
        self.send(self.request(Method::POST, "/api/payments/init").json(&json!({
            "amount": amount,
            "currency": currency,
            "job_id": job_id,
        })))
        .await
    }

    pub async fn verify_payment(&self, reference: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &format!("/api/payments/verify/{}", reference)))
            .await
    }

    // ---- Translation ----

    pub async fn translate(&self, text: &str, target_language: &str) -> Result<Value> {
        self.send(self.request(Method::POST, "/api/translate").json(&json!({
            "text": text,
            "targetLanguage": target_language,
        })))
        .await
    }

    fn store_session_token(&self, body: &Value) -> Result<()> {
        if let Some(token) = body.get("token").and_then(|t| t.as_str()) {
            self.tokens.save(token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::TokenStore;
    use reqwest::header::AUTHORIZATION;

    fn temp_client(name: &str) -> ApiClient {
        let path = std::env::temp_dir()
            .join(format!("gigcli-api-test-{}-{}", std::process::id(), name))
            .join("token");
        ApiClient::with_parts(
            "http://localhost:8080".to_string(),
            TokenStore::with_path(path),
        )
    }

    #[test]
    fn test_requests_omit_auth_header_without_a_token() {
        let client = temp_client("no-token");
        client.tokens().clear().expect("Clear failed");

        let request = client
            .request(Method::GET, "/api/me")
            .build()
            .expect("Build failed");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_requests_attach_stored_bearer_token() {
        let client = temp_client("with-token");
        client.tokens().save("abc.def.ghi").expect("Save failed");

        let request = client
            .request(Method::GET, "/api/me")
            .build()
            .expect("Build failed");
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .expect("Authorization header missing");
        assert_eq!(header, "Bearer abc.def.ghi");

        client.tokens().clear().expect("Clear failed");
    }

    #[test]
    fn test_request_paths_join_base_url() {
        let client = temp_client("paths");
        let request = client
            .request(Method::GET, "/api/jobs/J_K7NP3X")
            .build()
            .expect("Build failed");
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/jobs/J_K7NP3X"
        );
    }
}
