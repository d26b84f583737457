// src/jobs/handlers.rs

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::auth::AuthedUser;
use crate::common::{generate_job_id, ApiError, AppState, Validator};
use crate::jobs::models::*;
use crate::jobs::validators::JobValidator;

/// GET /api/jobs - List open jobs (paginated, newest first)
pub async fn list_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<JobQueryParams>,
) -> Result<Json<JobListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    // Parse pagination parameters with defaults
    let page = params.page.unwrap_or(1).max(1); // Ensure page is at least 1
    let limit = params.limit.unwrap_or(20).clamp(1, 100); // Limit between 1 and 100
    let offset = (page - 1) * limit;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = 'open'")
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let jobs = sqlx::query_as::<_, Job>(
        r#"SELECT
            id, title, description, category, budget_min, budget_max,
            location, posted_by, status, created_at, updated_at
        FROM jobs
        WHERE status = 'open'
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?"#,
    )
    .bind(limit as i64)
    .bind(offset as i64)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    debug!(
        job_count = jobs.len(),
        total = total,
        page = page,
        limit = limit,
        "Successfully loaded paginated jobs list"
    );

    Ok(Json(JobListResponse {
        jobs,
        total: total as usize,
        page,
        page_size: limit,
    }))
}

/// GET /api/jobs/:id - Get a specific job by ID (public endpoint)
pub async fn get_job_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, ApiError> {
    let state = state_lock.read().await.clone();

    let job = sqlx::query_as::<_, Job>(
        r#"SELECT
            id, title, description, category, budget_min, budget_max,
            location, posted_by, status, created_at, updated_at
        FROM jobs
        WHERE id = ?"#,
    )
    .bind(&job_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?
    .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))?;

    debug!(job_id = %job_id, job_title = %job.title, "Successfully loaded job details");

    Ok(Json(job))
}

/// POST /api/jobs - Create a job posting (authenticated)
pub async fn create_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateJob>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = JobValidator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation_result.errors,
            "Job creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let id = generate_job_id();
    let title = request.title.unwrap_or_default().trim().to_string();

    let job = sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs (id, title, description, category, budget_min, budget_max, location, posted_by, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'open')
        RETURNING id, title, description, category, budget_min, budget_max,
                  location, posted_by, status, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(&title)
    .bind(request.description.as_deref())
    .bind(request.category.as_deref())
    .bind(request.budget_min)
    .bind(request.budget_max)
    .bind(request.location.as_deref())
    .bind(&authed.id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(
        job_id = %job.id,
        user_id = %authed.id,
        "Job posting created"
    );

    Ok((StatusCode::CREATED, Json(job)))
}
