// src/payments/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Transaction Models
// ============================================================================

/// Payment record, keyed by the reference string shared with the gateway
#[derive(FromRow, Serialize, Deserialize, Debug)]
pub struct Transaction {
    pub reference: String,
    pub user_id: String,
    pub job_id: Option<String>,
    pub amount: i64, // integer minor units (kobo)
    pub currency: String,
    pub status: String,
    pub authorization_url: Option<String>,
    pub paid_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InitPaymentRequest {
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub job_id: Option<String>,
    /// Billing email; defaults to the authenticated user's address
    pub email: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct InitPaymentResponse {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Serialize, Debug)]
pub struct VerifyPaymentResponse {
    pub reference: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub paid_at: Option<String>,
}
