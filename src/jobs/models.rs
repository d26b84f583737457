// src/jobs/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Job Models
// ============================================================================

#[derive(FromRow, Serialize, Deserialize, Debug)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub location: Option<String>,
    pub posted_by: String,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// Paginated job list response
#[derive(Serialize, Debug)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Deserialize)]
pub struct CreateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobQueryParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}
