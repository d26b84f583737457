// src/users/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User database model
///
/// `password_hash` is None for OAuth-only accounts and never leaves the
/// server; API responses go through [`UserResponse`].
#[derive(FromRow, Debug, Clone)]
pub struct User {
    pub id: String,
    pub full_name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub is_verified: i64, // 0 or 1 in SQLite
    pub provider: String,
    pub created_at: Option<String>,
}

/// User shape returned by the API
#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub id: String,
    pub full_name: Option<String>,
    pub email: String,
    pub role: String,
    pub is_verified: bool,
    pub provider: String,
    pub created_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            is_verified: user.is_verified == 1,
            provider: user.provider,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}
