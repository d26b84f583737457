//! Authentication data models

use serde::{Deserialize, Serialize};

/// JWT claims structure
///
/// The role claim is read both by the server extractor and by clients that
/// decode the token locally to pick which surface to show.
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

/// Google ID token payload for the single-request OAuth flow
#[derive(Deserialize)]
pub struct GoogleIdTokenPayload {
    pub id_token: String,
}

/// Identity extracted from a verified Google ID token
#[derive(Debug)]
pub struct GoogleProfile {
    pub email: String,
    pub full_name: Option<String>,
}

/// Response from Google's code-exchange endpoint
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub id_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}
