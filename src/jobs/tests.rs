//! Tests for jobs module
//!
//! These tests verify job functionality including:
//! - Create/list/fetch round trips against an in-memory database
//! - Pagination bounds
//! - Job validation

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::auth::extractors::AuthedUser;
    use crate::common::migrations::run_migrations;
    use crate::common::{ApiError, AppState, Validator};
    use crate::services::{PaystackService, TranslationService};
    use axum::extract::{Extension, Json, Path, Query};
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

    /// Insert a user row so job foreign keys resolve, and return an extractor
    /// value the handlers accept.
    async fn seeded_user(shared: &Arc<RwLock<AppState>>) -> AuthedUser {
        let state = shared.read().await.clone();
        let user =
            crate::auth::handlers::upsert_google_user(&state.db, "poster@example.com", Some("P"))
                .await
                .expect("Seeding user failed");
        AuthedUser {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }

    fn create_request(title: &str) -> models::CreateJob {
        models::CreateJob {
            title: Some(title.to_string()),
            description: Some("Build a landing page".to_string()),
            category: Some("web".to_string()),
            budget_min: Some(50_000),
            budget_max: Some(120_000),
            location: Some("Lagos".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_fetch_job() {
        let shared = test_state().await;
        let authed = seeded_user(&shared).await;
        let poster_id = authed.id.clone();

        let (status, Json(job)) = handlers::create_job(
            Extension(shared.clone()),
            authed,
            Json(create_request("Logo design")),
        )
        .await
        .expect("Job creation failed");

        assert_eq!(status, StatusCode::CREATED);
        assert!(job.id.starts_with("J_"));
        assert_eq!(job.title, "Logo design");
        assert_eq!(job.status, "open");
        assert_eq!(job.posted_by, poster_id);

        let Json(fetched) = handlers::get_job_by_id(Extension(shared), Path(job.id.clone()))
            .await
            .expect("Job fetch failed");
        assert_eq!(fetched.id, job.id);
        assert_eq!(fetched.budget_max, Some(120_000));
    }

    #[tokio::test]
    async fn test_get_unknown_job_returns_not_found() {
        let shared = test_state().await;

        let err = handlers::get_job_by_id(Extension(shared), Path("J_MISSING".to_string()))
            .await
            .expect_err("Unknown job should not resolve");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_jobs_paginates() {
        let shared = test_state().await;
        let authed = seeded_user(&shared).await;

        for i in 0..3 {
            let authed = AuthedUser {
                id: authed.id.clone(),
                email: authed.email.clone(),
                role: authed.role.clone(),
            };
            handlers::create_job(
                Extension(shared.clone()),
                authed,
                Json(create_request(&format!("Job {}", i))),
            )
            .await
            .expect("Job creation failed");
        }

        let Json(listing) = handlers::list_jobs(
            Extension(shared.clone()),
            Query(models::JobQueryParams {
                page: Some(1),
                limit: Some(2),
            }),
        )
        .await
        .expect("Job listing failed");

        assert_eq!(listing.total, 3);
        assert_eq!(listing.jobs.len(), 2);
        assert_eq!(listing.page, 1);
        assert_eq!(listing.page_size, 2);

        let Json(listing) = handlers::list_jobs(
            Extension(shared),
            Query(models::JobQueryParams {
                page: Some(2),
                limit: Some(2),
            }),
        )
        .await
        .expect("Job listing failed");
        assert_eq!(listing.jobs.len(), 1);
    }

    #[test]
    fn test_create_job_validation() {
        let validator = validators::JobValidator;

        let mut request = create_request("Logo design");
        request.title = None;
        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "title");

        let mut request = create_request("Logo design");
        request.budget_min = Some(200_000);
        request.budget_max = Some(100_000);
        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "budget_range");

        let mut request = create_request("Logo design");
        request.budget_min = Some(-5);
        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "budget_min");

        let result = validator.validate(&create_request("Logo design"));
        assert!(result.is_valid);
    }
}
