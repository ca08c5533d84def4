//! Admin authentication extractor.
//!
//! Two checks on every request: the bearer token must resolve to a user
//! upstream, and that user's profile row must carry the `admin` role. The
//! role lives in the store, not the token, so revoking it takes effect on
//! the next request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use arc_audio_core::{CommerceStore, UserId};

use crate::error::AdminError;
use crate::state::AppState;

/// The authenticated admin behind a valid bearer token.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: UserId,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AdminError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AdminError::Unauthorized("missing bearer token".to_string()))?;

        let user = state
            .auth()
            .get_user(&token)
            .await?
            .ok_or_else(|| AdminError::Unauthorized("invalid or expired token".to_string()))?;

        let profile = state.store().profile(user.id).await?;
        if !profile.is_some_and(|p| p.is_admin()) {
            return Err(AdminError::Forbidden);
        }

        Ok(Self {
            id: user.id,
            email: user.email,
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
