use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

/// The one well-known session token. Possession of this string is the
/// entire admin capability; there is no identity, expiry, or revocation.
pub const SESSION_TOKEN: &str = "admin-session-token";

/// Compare the submitted credential against the configured secret.
/// Exact, case-sensitive match. An empty secret never authenticates,
/// so an unconfigured deployment cannot be logged into.
pub fn login(submitted: &str, secret: &str) -> Option<&'static str> {
    if secret.is_empty() || submitted != secret {
        return None;
    }
    Some(SESSION_TOKEN)
}

/// True iff the presented credential equals the issued token.
pub fn authorize(presented: &str) -> bool {
    presented == SESSION_TOKEN
}

/// Extractor guarding mutating admin routes. Rejects with 401 before the
/// handler body runs, so a bad credential never touches the store.
/// The credential is the raw token in the Authorization header, unprefixed.
pub struct AdminSession;

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if authorize(presented) {
            Ok(AdminSession)
        } else {
            Err(ApiError::unauthorized("Unauthorized"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_issues_token_on_exact_match() {
        assert_eq!(login("hunter2", "hunter2"), Some(SESSION_TOKEN));
    }

    #[test]
    fn login_rejects_mismatch() {
        assert_eq!(login("Hunter2", "hunter2"), None);
        assert_eq!(login("", "hunter2"), None);
    }

    #[test]
    fn empty_secret_never_authenticates() {
        assert_eq!(login("", ""), None);
        assert_eq!(login("anything", ""), None);
    }

    #[test]
    fn authorize_accepts_only_the_issued_token() {
        assert!(authorize(SESSION_TOKEN));
        assert!(!authorize(""));
        assert!(!authorize("admin123"));
        assert!(!authorize("Bearer admin-session-token"));
    }
}
