//! Tests for users module
//!
//! These tests verify account functionality including:
//! - Registration/login round trips against an in-memory database
//! - The admin gate on the user listing
//! - Request validation

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::auth::extractors::AuthedUser;
    use crate::common::migrations::run_migrations;
    use crate::common::{AppState, Validator};
    use crate::services::{PaystackService, TranslationService};
    use axum::extract::{Extension, Json};
    use axum::http::StatusCode;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    async fn test_state() -> Arc<RwLock<AppState>> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        run_migrations(&pool).await.expect("Migrations failed");

        let state = AppState {
            db: pool,
            http: reqwest::Client::new(),
            jwt_secret: "test_secret_key".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            google_client_id: None,
            google_client_secret: None,
            paystack_service: Arc::new(PaystackService::new(
                None,
                "https://api.paystack.co".to_string(),
            )),
            translation_service: Arc::new(TranslationService::new(
                None,
                "https://translation.googleapis.com".to_string(),
            )),
        };
        Arc::new(RwLock::new(state))
    }

    fn register_request(email: &str) -> models::RegisterRequest {
        models::RegisterRequest {
            full_name: Some("Ada Obi".to_string()),
            email: Some(email.to_string()),
            password: Some("correct-horse".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let shared = test_state().await;

        let (status, Json(body)) = handlers::register_user(
            Extension(shared.clone()),
            Json(register_request("Ada@Example.com")),
        )
        .await
        .expect("Registration failed");

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["token"].as_str().map_or(false, |t| !t.is_empty()));
        // Emails are normalized to lowercase on the way in
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert_eq!(body["user"]["role"], "freelancer");
        assert_eq!(body["user"]["provider"], "local");
        assert_eq!(body["user"]["is_verified"], false);

        let Json(body) = handlers::login_user(
            Extension(shared),
            Json(models::LoginRequest {
                email: Some("ada@example.com".to_string()),
                password: Some("correct-horse".to_string()),
            }),
        )
        .await
        .expect("Login failed");

        assert!(body["token"].as_str().map_or(false, |t| !t.is_empty()));
        assert_eq!(body["user"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let shared = test_state().await;

        handlers::register_user(
            Extension(shared.clone()),
            Json(register_request("ada@example.com")),
        )
        .await
        .expect("First registration failed");

        let err = handlers::register_user(
            Extension(shared),
            Json(register_request("ada@example.com")),
        )
        .await
        .expect_err("Duplicate registration should fail");

        assert!(matches!(err, crate::common::ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_email() {
        let shared = test_state().await;

        handlers::register_user(
            Extension(shared.clone()),
            Json(register_request("ada@example.com")),
        )
        .await
        .expect("Registration failed");

        let err = handlers::login_user(
            Extension(shared.clone()),
            Json(models::LoginRequest {
                email: Some("ada@example.com".to_string()),
                password: Some("wrong-password".to_string()),
            }),
        )
        .await
        .expect_err("Wrong password should fail");
        assert!(matches!(err, crate::common::ApiError::Unauthorized(_)));

        let err = handlers::login_user(
            Extension(shared),
            Json(models::LoginRequest {
                email: Some("nobody@example.com".to_string()),
                password: Some("whatever-pass".to_string()),
            }),
        )
        .await
        .expect_err("Unknown email should fail");
        assert!(matches!(err, crate::common::ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_login_rejects_oauth_only_account() {
        let shared = test_state().await;

        {
            let state = shared.read().await.clone();
            crate::auth::handlers::upsert_google_user(&state.db, "ada@example.com", Some("Ada"))
                .await
                .expect("OAuth upsert failed");
        }

        let err = handlers::login_user(
            Extension(shared),
            Json(models::LoginRequest {
                email: Some("ada@example.com".to_string()),
                password: Some("any-password".to_string()),
            }),
        )
        .await
        .expect_err("OAuth-only account has no password to log in with");
        assert!(matches!(err, crate::common::ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_list_users_requires_admin_role() {
        let shared = test_state().await;

        handlers::register_user(
            Extension(shared.clone()),
            Json(register_request("ada@example.com")),
        )
        .await
        .expect("Registration failed");

        let freelancer = AuthedUser {
            id: "U_TEST01".to_string(),
            email: "ada@example.com".to_string(),
            role: "freelancer".to_string(),
        };
        let err = handlers::list_users(Extension(shared.clone()), freelancer)
            .await
            .expect_err("Non-admin listing should fail");
        assert!(matches!(err, crate::common::ApiError::Forbidden(_)));

        let admin = AuthedUser {
            id: "U_ADMIN1".to_string(),
            email: "root@example.com".to_string(),
            role: "admin".to_string(),
        };
        let Json(listing) = handlers::list_users(Extension(shared), admin)
            .await
            .expect("Admin listing failed");
        assert_eq!(listing.total, 1);
        assert_eq!(listing.users[0].email, "ada@example.com");
    }

    #[test]
    fn test_register_validation_catches_missing_and_malformed_fields() {
        let validator = validators::RegisterValidator;

        let result = validator.validate(&models::RegisterRequest {
            full_name: None,
            email: None,
            password: None,
        });
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 3);

        let result = validator.validate(&models::RegisterRequest {
            full_name: Some("Ada Obi".to_string()),
            email: Some("not-an-email".to_string()),
            password: Some("short".to_string()),
        });
        assert!(!result.is_valid);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"password"));
    }

    #[test]
    fn test_login_validation_requires_both_fields() {
        let validator = validators::LoginValidator;

        let result = validator.validate(&models::LoginRequest {
            email: Some("ada@example.com".to_string()),
            password: None,
        });
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "password");
    }
}
