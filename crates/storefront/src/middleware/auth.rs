//! Authentication extractor.
//!
//! Buyers authenticate against the hosted auth subsystem and send the
//! resulting access token as a bearer header. The extractor validates the
//! token upstream on every request; there is no local session for identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use arc_audio_core::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated buyer behind a valid bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Option<String>,
    /// The raw token, kept for sign-out.
    pub access_token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let user = state
            .auth()
            .get_user(&token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid or expired token".to_string()))?;

        Ok(Self {
            id: user.id,
            email: user.email,
            access_token: token,
        })
    }
}

/// Pull the token out of an `Authorization: Bearer ...` header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .header(axum::http::header::AUTHORIZATION, value)
            .body(())
            .map(Request::into_parts)
            .unwrap_or_else(|_| unreachable!("valid request"));
        parts
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth("Bearer abc123");
        assert_eq!(bearer_token(&parts), Some("abc123".to_string()));
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&parts), None);

        let parts = parts_with_auth("Bearer   ");
        assert_eq!(bearer_token(&parts), None);
    }
}
