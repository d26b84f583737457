// src/users/handlers.rs

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::models::*;
use super::validators::{LoginValidator, RegisterValidator};
use crate::auth::{issue_token, AuthedUser};
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState, Validator};

/// POST /api/users/register - Create a local account
///
/// # Request Body
/// ```json
/// {
///   "full_name": "Ada Obi",
///   "email": "ada@example.com",
///   "password": "..."
/// }
/// ```
pub async fn register_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = RegisterValidator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            errors = ?validation_result.errors,
            "Registration validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    // Presence is guaranteed by the validator above
    let full_name = request.full_name.unwrap_or_default().trim().to_string();
    let email = request.email.unwrap_or_default().trim().to_lowercase();
    let password = request.password.unwrap_or_default();

    let password_hash = hash(&password, DEFAULT_COST).map_err(|e| {
        error!(error = %e, "Password hashing failed during registration");
        ApiError::InternalServer("registration failed".to_string())
    })?;

    let id = generate_user_id();
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, full_name, email, password_hash, role, is_verified, provider)
        VALUES (?, ?, ?, ?, 'freelancer', 0, 'local')
        RETURNING id, full_name, email, password_hash, role, is_verified, provider, created_at
        "#,
    )
    .bind(&id)
    .bind(&full_name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .map_or(false, |db_err| db_err.is_unique_violation())
        {
            warn!(
                email = %safe_email_log(&email),
                "Registration rejected: email already registered"
            );
            ApiError::BadRequest("email already registered".to_string())
        } else {
            error!(error = %e, "Database error inserting new user");
            ApiError::DatabaseError(e)
        }
    })?;

    let token = issue_token(&state.jwt_secret, &user)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "New user account registered"
    );

    let resp = serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    });
    Ok((StatusCode::CREATED, Json(resp)))
}

/// POST /api/users/login - Authenticate a local account
pub async fn login_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = LoginValidator.validate(&request);
    if !validation_result.is_valid {
        return Err(ApiError::from(validation_result));
    }

    let email = request.email.unwrap_or_default().trim().to_lowercase();
    let password = request.password.unwrap_or_default();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    // One non-committal message for every failure mode below, so a caller
    // can't probe which emails exist
    let user = match user {
        Some(u) => u,
        None => {
            warn!(
                email = %safe_email_log(&email),
                "Login failed: unknown email"
            );
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
    };

    let password_hash = match &user.password_hash {
        Some(h) => h,
        None => {
            // OAuth-only account, there is no password to check
            warn!(
                user_id = %user.id,
                "Login failed: account has no local password"
            );
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
    };

    if !verify(&password, password_hash).unwrap_or(false) {
        warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(ApiError::Unauthorized("invalid credentials".to_string()));
    }

    let token = issue_token(&state.jwt_secret, &user)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User login successful"
    );

    let resp = serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    });
    Ok(Json(resp))
}

/// GET /api/users - List all users (admin only)
pub async fn list_users(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<UserListResponse>, ApiError> {
    if !authed.is_admin() {
        warn!(
            user_id = %authed.id,
            role = %authed.role,
            "User listing rejected: admin role required"
        );
        return Err(ApiError::Forbidden("admin access required".to_string()));
    }

    let state = state_lock.read().await.clone();

    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    let total = users.len();

    debug!(total = total, "User list loaded");

    Ok(Json(UserListResponse { users, total }))
}

/// GET /api/me - Return the authenticated user's record
pub async fn me_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| {
            warn!(user_id = %authed.id, "Token subject no longer exists");
            ApiError::NotFound("user not found".to_string())
        })?;

    let resp = serde_json::json!({
        "user": UserResponse::from(user),
    });
    Ok(Json(resp))
}
