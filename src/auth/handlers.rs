//! Authentication handlers

use axum::extract::{Extension, Json, Query};
use axum::response::Redirect;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::models::{Claims, GoogleIdTokenPayload, GoogleProfile, GoogleTokenResponse};
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};
use crate::users::models::{User, UserResponse};

/// POST /api/auth/google
/// Authenticates a user via a Google OAuth ID token
///
/// # Request Body
/// ```json
/// {
///   "id_token": "<google id token>"
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "token": "<jwt token>",
///   "user": { ... }
/// }
/// ```
pub async fn google_auth(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<GoogleIdTokenPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Received Google auth request");
    let state = state_lock.read().await.clone();

    let profile = verify_google_id_token(
        &state.http,
        state.google_client_id.as_deref(),
        &payload.id_token,
    )
    .await?;

    let user = upsert_google_user(&state.db, &profile.email, profile.full_name.as_deref()).await?;

    let token = issue_token(&state.jwt_secret, &user)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        provider = "google",
        "User authentication successful via Google OAuth"
    );

    let resp = serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    });

    Ok(Json(resp))
}

/// GET /api/auth/google - Start the Google OAuth authorization-code flow
/// Redirects the browser to Google's consent page
pub async fn google_oauth_start(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Redirect, ApiError> {
    let state = state_lock.read().await.clone();

    let client_id = state.google_client_id.as_deref().ok_or_else(|| {
        error!("GOOGLE_CLIENT_ID not configured, cannot start OAuth flow");
        ApiError::InternalServer("google oauth not configured".to_string())
    })?;

    let redirect_uri = oauth_redirect_uri();

    let auth_url = format!(
        "https://accounts.google.com/o/oauth2/v2/auth?client_id={}&redirect_uri={}&response_type=code&scope={}&prompt=select_account",
        urlencoding::encode(client_id),
        urlencoding::encode(&redirect_uri),
        urlencoding::encode("openid email profile"),
    );

    info!(redirect_uri = %redirect_uri, "Starting Google OAuth flow");
    Ok(Redirect::to(&auth_url))
}

/// GET /api/auth/google/callback - Handle the OAuth callback from Google
///
/// Exchanges the authorization code for tokens, verifies the returned ID
/// token, upserts the user, and sends the browser back to the frontend with
/// the issued JWT in the URL. Every failure path lands on the frontend login
/// page instead of a JSON error, since the caller here is a browser redirect.
pub async fn google_oauth_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Redirect {
    let state = state_lock.read().await.clone();
    let login_url = format!("{}/login", state.frontend_url);

    if let Some(oauth_error) = params.get("error") {
        warn!(oauth_error = %oauth_error, "Google OAuth returned error");
        return Redirect::to(&login_url);
    }

    let code = match params.get("code") {
        Some(c) => c,
        None => {
            warn!("No authorization code in OAuth callback");
            return Redirect::to(&login_url);
        }
    };

    let token = match complete_oauth_login(&state, code).await {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Google OAuth callback failed");
            return Redirect::to(&login_url);
        }
    };

    Redirect::to(&format!(
        "{}/oauth/callback?token={}",
        state.frontend_url, token
    ))
}

/// POST /api/auth/logout
/// Logout endpoint - since we're using JWT tokens, logout is handled
/// client-side. This endpoint just returns success to confirm the request.
pub async fn logout_handler(
    _authed: super::extractors::AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("User logout successful");
    let resp = serde_json::json!({
        "message": "Logout successful"
    });
    Ok(Json(resp))
}

// ---- Helper Functions ----

/// Exchange the authorization code, verify the identity, and issue a JWT
async fn complete_oauth_login(state: &AppState, code: &str) -> Result<String, ApiError> {
    let client_id = state
        .google_client_id
        .as_deref()
        .ok_or_else(|| ApiError::InternalServer("google oauth not configured".to_string()))?;
    let client_secret = state
        .google_client_secret
        .as_deref()
        .ok_or_else(|| ApiError::InternalServer("google oauth not configured".to_string()))?;

    let token_response = exchange_code(&state.http, client_id, client_secret, code).await?;

    let id_token = token_response.id_token.ok_or_else(|| {
        warn!("Google token exchange response missing id_token");
        ApiError::Upstream("google token exchange returned no identity".to_string())
    })?;

    let profile =
        verify_google_id_token(&state.http, state.google_client_id.as_deref(), &id_token).await?;

    let user = upsert_google_user(&state.db, &profile.email, profile.full_name.as_deref()).await?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        provider = "google",
        "User authentication successful via OAuth callback"
    );

    issue_token(&state.jwt_secret, &user)
}

/// Exchange an authorization code for Google tokens
async fn exchange_code(
    http: &Client,
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> Result<GoogleTokenResponse, ApiError> {
    let redirect_uri = oauth_redirect_uri();

    let form = [
        ("code", code),
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("redirect_uri", redirect_uri.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let resp = http
        .post("https://oauth2.googleapis.com/token")
        .form(&form)
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, "HTTP error contacting Google token endpoint");
            ApiError::Upstream("google token exchange unavailable".to_string())
        })?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!(http_status = %status, body = %body, "Google code exchange rejected");
        return Err(ApiError::Upstream("google code exchange failed".to_string()));
    }

    resp.json::<GoogleTokenResponse>().await.map_err(|e| {
        error!(error = %e, "Failed to parse Google token response");
        ApiError::Upstream("malformed google token response".to_string())
    })
}

fn oauth_redirect_uri() -> String {
    std::env::var("GOOGLE_OAUTH_REDIRECT_URI")
        .unwrap_or_else(|_| "http://localhost:8080/api/auth/google/callback".to_string())
}

/// Verify a Google ID token against the tokeninfo endpoint and extract the
/// identity fields this application cares about.
///
/// Docs: https://developers.google.com/identity/sign-in/web/backend-auth
pub(crate) async fn verify_google_id_token(
    http: &Client,
    expected_client_id: Option<&str>,
    id_token: &str,
) -> Result<GoogleProfile, ApiError> {
    let tokeninfo_url = format!(
        "https://oauth2.googleapis.com/tokeninfo?id_token={}",
        id_token
    );

    debug!("Initiating Google token validation with tokeninfo endpoint");

    let resp = http.get(&tokeninfo_url).send().await;
    let body = match resp {
        Ok(r) => {
            let status = r.status();
            debug!(http_status = %status, "Received response from Google tokeninfo endpoint");

            if status.is_success() {
                r.json::<serde_json::Value>().await.map_err(|e| {
                    error!(error = %e, "Failed to parse Google tokeninfo JSON response");
                    ApiError::BadRequest("malformed id_token".to_string())
                })?
            } else {
                match status.as_u16() {
                    400 => {
                        warn!(http_status = %status, "Google tokeninfo returned 400");
                        return Err(ApiError::BadRequest(
                            "invalid or malformed id_token".to_string(),
                        ));
                    }
                    401 => {
                        warn!(http_status = %status, "Google tokeninfo returned 401");
                        return Err(ApiError::Unauthorized(
                            "expired or invalid id_token".to_string(),
                        ));
                    }
                    _ => {
                        warn!(http_status = %status, "Google tokeninfo returned error status");
                        return Err(ApiError::BadRequest(
                            "id_token validation failed".to_string(),
                        ));
                    }
                }
            }
        }
        Err(e) => {
            error!(
                error = %e,
                endpoint = "https://oauth2.googleapis.com/tokeninfo",
                "HTTP error contacting Google tokeninfo endpoint"
            );
            return Err(ApiError::Upstream(
                "google token validation service unavailable".to_string(),
            ));
        }
    };

    let email = body
        .get("email")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let sub = body.get("sub").and_then(|v| v.as_str()).map(str::to_string);
    let full_name = body
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    if email.is_none() || sub.is_none() {
        warn!(
            has_email = email.is_some(),
            has_sub = sub.is_some(),
            "Google token missing required fields (email/sub)"
        );
        return Err(ApiError::BadRequest(
            "token missing required fields".to_string(),
        ));
    }

    // Check token expiration
    if let Some(exp) = body.get("exp").and_then(|v| v.as_i64()) {
        let current_time = Utc::now().timestamp();
        if exp < current_time {
            warn!(token_exp = exp, "Google token has expired");
            return Err(ApiError::Unauthorized("token has expired".to_string()));
        }
    }

    // Validate audience (client id) when configured
    if let Some(client_id) = expected_client_id {
        match body.get("aud").and_then(|v| v.as_str()) {
            Some(aud_val) => {
                if aud_val != client_id {
                    warn!(
                        token_audience = %aud_val,
                        "Google token audience validation failed - rejecting token"
                    );
                    return Err(ApiError::Unauthorized(
                        "token audience mismatch".to_string(),
                    ));
                }
            }
            None => {
                warn!("Google token missing audience field - rejecting token");
                return Err(ApiError::Unauthorized("token missing audience".to_string()));
            }
        }
    }

    let email = email.unwrap_or_default().to_lowercase();
    debug!(
        email = %safe_email_log(&email),
        provider = "google",
        "Google token validation successful"
    );

    Ok(GoogleProfile { email, full_name })
}

/// Find-or-create a user row for a verified Google identity
///
/// Single atomic statement keyed on the unique email column: concurrent
/// first logins by the same address cannot both insert. New accounts get the
/// default freelancer role and are created verified (Google vouches for the
/// address); repeat logins refresh the display name.
pub(crate) async fn upsert_google_user(
    pool: &SqlitePool,
    email: &str,
    full_name: Option<&str>,
) -> Result<User, ApiError> {
    let id = generate_user_id();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, full_name, email, role, is_verified, provider)
        VALUES (?, ?, ?, 'freelancer', 1, 'google')
        ON CONFLICT(email) DO UPDATE SET
            full_name = COALESCE(excluded.full_name, users.full_name)
        RETURNING id, full_name, email, password_hash, role, is_verified, provider, created_at
        "#,
    )
    .bind(&id)
    .bind(full_name)
    .bind(email)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            email = %safe_email_log(email),
            provider = "google",
            "Database error upserting user during OAuth flow"
        );
        ApiError::DatabaseError(e)
    })
}

/// Create a signed JWT for an authenticated user
pub fn issue_token(jwt_secret: &str, user: &User) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, user_id = %user.id, "JWT encoding error");
        ApiError::InternalServer("jwt error".to_string())
    })
}
