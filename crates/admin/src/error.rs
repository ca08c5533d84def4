//! Unified error handling with Sentry integration.
//!
//! All route handlers return `Result<T, AdminError>`. Store failures keep
//! the upstream message so the console can show what the backend rejected.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use arc_audio_core::StoreError;
use arc_audio_supabase::SupabaseError;

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The remote store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

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

    /// Authenticated but not an admin.
    #[error("Forbidden: admin role required")]
    Forbidden,
}

impl AdminError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Store(err) => match err {
                StoreError::Remote(_) | StoreError::Malformed(_) => StatusCode::BAD_GATEWAY,
                StoreError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            },
            Self::Auth(SupabaseError::RateLimited(_)) => StatusCode::TOO_MANY_REQUESTS,
            Self::Auth(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AdminError {
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

        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AdminError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AdminError::Validation("title is required".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AdminError::Store(StoreError::Remote("boom".to_string())).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
