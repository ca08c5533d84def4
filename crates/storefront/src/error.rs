//! Unified error handling with Sentry integration.
//!
//! All route handlers return `Result<T, AppError>`; the `IntoResponse` impl
//! captures server-side failures to Sentry and renders a small JSON body.
//! Upstream store messages are passed through verbatim so the client can
//! show them; rate limits additionally carry the cooldown.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use arc_audio_core::StoreError;
use arc_audio_supabase::SupabaseError;

use crate::services::cart::CartError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The remote store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cart mutation was rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Checkout failed part-way through its write sequence.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The auth subsystem rejected the request.
    #[error(transparent)]
    Auth(#[from] SupabaseError),

    /// Bad input from the client.
    #[error("{0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Store(err) | Self::Cart(CartError::Store(err)) => store_status(err),
            Self::Cart(CartError::OutOfStock | CartError::InsufficientStock { .. }) => {
                StatusCode::CONFLICT
            }
            Self::Checkout(_) => StatusCode::BAD_GATEWAY,
            Self::Auth(err) => auth_status(err),
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Store(StoreError::RateLimited(secs))
            | Self::Cart(CartError::Store(StoreError::RateLimited(secs)))
            | Self::Auth(SupabaseError::RateLimited(secs)) => Some(*secs),
            _ => None,
        }
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Remote(_) | StoreError::Malformed(_) => StatusCode::BAD_GATEWAY,
        StoreError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

fn auth_status(err: &SupabaseError) -> StatusCode {
    match err {
        SupabaseError::Api { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        SupabaseError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        SupabaseError::NotFound(_) => StatusCode::NOT_FOUND,
        SupabaseError::Http(_) | SupabaseError::Parse(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let mut body = serde_json::json!({ "error": self.to_string() });
        if let Some(secs) = self.retry_after() {
            body["retry_after_secs"] = secs.into();
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Cart(CartError::OutOfStock).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Store(StoreError::Remote("boom".to_string())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Store(StoreError::RateLimited(30)).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::Validation("title is required".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Unauthorized("missing token".to_string()).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_upstream_message_is_preserved() {
        let err = AppError::Store(StoreError::Remote("duplicate key value".to_string()));
        assert_eq!(err.to_string(), "duplicate key value");
    }

    #[test]
    fn test_rate_limit_carries_cooldown() {
        let err = AppError::Auth(SupabaseError::RateLimited(17));
        assert_eq!(err.retry_after(), Some(17));
    }
}
