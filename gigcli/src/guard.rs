// gigcli/src/guard.rs
//! Client-side role guard
//!
//! Decodes the stored JWT's payload without verifying the signature and
//! decides which surface to show. Convenience only: the server re-validates
//! every request, so a doctored token buys nothing past this menu check.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
}

#[derive(Debug, PartialEq)]
pub enum GuardDecision {
    /// Token present, role matches
    Allow,
    /// No usable token - go log in
    Login,
    /// Logged in, wrong role - show the blocking notice and fall back
    Denied { role: String },
}

/// Decode the payload segment of a JWT without signature verification
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Decide what to do with the stored token for a role-gated surface
pub fn check_role(token: Option<&str>, required_role: &str) -> GuardDecision {
    let token = match token {
        Some(t) => t,
        None => return GuardDecision::Login,
    };

    let claims = match decode_claims(token) {
        Some(c) => c,
        None => return GuardDecision::Login,
    };

    // A stale token can't be used; send the user back through login
    if claims.exp <= Utc::now().timestamp() {
        return GuardDecision::Login;
    }

    if claims.role != required_role {
        return GuardDecision::Denied { role: claims.role };
    }

    GuardDecision::Allow
}
