// gigcli/src/auth.rs
//! OAuth callback capture
//!
//! The backend finishes a Google login by redirecting the browser to the
//! frontend callback URL with the issued JWT as a `token` query parameter.
//! This module pulls the token out of that URL so it can be persisted; a URL
//! without one means the login failed and the user goes back to `login`.

/// Extract the `token` query parameter from an OAuth redirect URL
pub fn extract_token(url: &str) -> Option<String> {
    // Fragments are never part of the query
    let url = url.split('#').next()?;
    let query = url.splitn(2, '?').nth(1)?;

    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() == Some("token") {
            return parts
                .next()
                .filter(|v| !v.is_empty())
                .map(str::to_string);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_token_parameter() {
        let url = "http://localhost:3000/oauth/callback?token=abc.def.ghi";
        assert_eq!(extract_token(url), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_finds_token_among_other_parameters() {
        let url = "http://localhost:3000/oauth/callback?state=xyz&token=abc.def.ghi&foo=1";
        assert_eq!(extract_token(url), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_ignores_fragments() {
        let url = "http://localhost:3000/oauth/callback?token=abc.def.ghi#section";
        assert_eq!(extract_token(url), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_missing_or_empty_token_yields_none() {
        assert_eq!(
            extract_token("http://localhost:3000/oauth/callback"),
            None
        );
        assert_eq!(
            extract_token("http://localhost:3000/oauth/callback?error=denied"),
            None
        );
        assert_eq!(
            extract_token("http://localhost:3000/oauth/callback?token="),
            None
        );
    }
}
