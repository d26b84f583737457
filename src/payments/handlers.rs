// src/payments/handlers.rs

use axum::{
    extract::{Extension, Path},
    response::Json,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::auth::AuthedUser;
use crate::common::{generate_transaction_reference, ApiError, AppState, Validator};
use crate::payments::models::*;
use crate::payments::validators::InitPaymentValidator;
use crate::services::paystack::PaystackError;

/// POST /api/payments/init - Initialize a gateway transaction
///
/// # Request Body
/// ```json
/// {
///   "amount": 50000,
///   "currency": "NGN",
///   "job_id": "J_K7NP3X"
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "authorization_url": "https://checkout...",
///   "access_code": "...",
///   "reference": "T_..."
/// }
/// ```
pub async fn init_payment(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<InitPaymentRequest>,
) -> Result<Json<InitPaymentResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation_result = InitPaymentValidator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation_result.errors,
            "Payment initialization validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    // Presence is guaranteed by the validator above
    let amount = request.amount.unwrap_or_default();
    let currency = request.currency.unwrap_or_else(|| "NGN".to_string());
    let email = request.email.unwrap_or_else(|| authed.email.clone());

    // The paid-for job must exist before money moves toward it
    if let Some(job_id) = &request.job_id {
        let job_exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs WHERE id = ?")
            .bind(job_id)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
        if job_exists == 0 {
            warn!(job_id = %job_id, "Payment init rejected: job not found");
            return Err(ApiError::BadRequest(format!("Job not found: {}", job_id)));
        }
    }

    let reference = generate_transaction_reference();

    let authorization = state
        .paystack_service
        .initialize_transaction(&email, amount, &currency, &reference, None)
        .await
        .map_err(map_paystack_error)?;

    record_pending_transaction(
        &state.db,
        &authorization.reference,
        &authed.id,
        request.job_id.as_deref(),
        amount,
        &currency,
        &authorization.authorization_url,
    )
    .await?;

    info!(
        reference = %authorization.reference,
        user_id = %authed.id,
        amount = amount,
        "Payment transaction initialized"
    );

    Ok(Json(InitPaymentResponse {
        authorization_url: authorization.authorization_url,
        access_code: authorization.access_code,
        reference: authorization.reference,
    }))
}

/// GET /api/payments/verify/:reference - Verify a transaction with the gateway
pub async fn verify_payment(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(reference): Path<String>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    // Only verify references this server actually issued
    let known = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM transactions WHERE reference = ?",
    )
    .bind(&reference)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if known == 0 {
        warn!(reference = %reference, "Verification rejected: unknown reference");
        return Err(ApiError::NotFound(format!(
            "Transaction not found: {}",
            reference
        )));
    }

    let verification = state
        .paystack_service
        .verify_transaction(&reference)
        .await
        .map_err(map_paystack_error)?;

    let transaction = apply_verification(
        &state.db,
        &reference,
        &verification.status,
        verification.paid_at.as_deref(),
    )
    .await?;

    info!(
        reference = %reference,
        status = %transaction.status,
        user_id = %authed.id,
        "Payment verification recorded"
    );

    Ok(Json(VerifyPaymentResponse {
        reference: transaction.reference,
        status: transaction.status,
        amount: transaction.amount,
        currency: transaction.currency,
        paid_at: transaction.paid_at,
    }))
}

// ---- Helper Functions ----

/// Store the pending row for a freshly initialized transaction
pub(crate) async fn record_pending_transaction(
    pool: &SqlitePool,
    reference: &str,
    user_id: &str,
    job_id: Option<&str>,
    amount: i64,
    currency: &str,
    authorization_url: &str,
) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO transactions (reference, user_id, job_id, amount, currency, status, authorization_url)
        VALUES (?, ?, ?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(reference)
    .bind(user_id)
    .bind(job_id)
    .bind(amount)
    .bind(currency)
    .bind(authorization_url)
    .execute(pool)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            reference = %reference,
            "Database error recording pending transaction"
        );
        ApiError::DatabaseError(e)
    })?;

    Ok(())
}

/// Write the gateway's verdict onto the stored row and return it
pub(crate) async fn apply_verification(
    pool: &SqlitePool,
    reference: &str,
    status: &str,
    paid_at: Option<&str>,
) -> Result<Transaction, ApiError> {
    sqlx::query_as::<_, Transaction>(
        r#"
        UPDATE transactions
        SET status = ?, paid_at = ?, updated_at = datetime('now')
        WHERE reference = ?
        RETURNING reference, user_id, job_id, amount, currency, status,
                  authorization_url, paid_at, created_at, updated_at
        "#,
    )
    .bind(status)
    .bind(paid_at)
    .bind(reference)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            reference = %reference,
            "Database error applying verification result"
        );
        ApiError::DatabaseError(e)
    })
}

/// Translate gateway wrapper errors into the API taxonomy
fn map_paystack_error(err: PaystackError) -> ApiError {
    match err {
        PaystackError::NotConfigured => {
            ApiError::InternalServer("payment gateway not configured".to_string())
        }
        PaystackError::RequestFailed(msg)
        | PaystackError::GatewayRejected(msg)
        | PaystackError::InvalidResponse(msg) => ApiError::Upstream(msg),
    }
}
