//! Authentication route handlers.
//!
//! Credentials are forwarded to the hosted auth subsystem; the storefront
//! never stores passwords. Email addresses are normalized before leaving
//! the server so mobile keyboards (fullwidth characters, smart quotes,
//! stray whitespace) do not create duplicate accounts.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use arc_audio_core::Email;
use arc_audio_supabase::{AuthSession, SignUp};

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    fn parse(&self) -> Result<(Email, &str)> {
        let email =
            Email::parse(&self.email).map_err(|e| AppError::Validation(e.to_string()))?;
        if self.password.is_empty() {
            return Err(AppError::Validation("password is required".to_string()));
        }
        Ok((email, &self.password))
    }
}

/// `POST /auth/register` - create an account.
///
/// With email confirmation enabled upstream, the response carries the user
/// but no session.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<serde_json::Value>> {
    let (email, password) = body.parse()?;
    let SignUp { user, session } = state.auth().sign_up(&email, password).await?;
    Ok(Json(serde_json::json!({
        "user": user,
        "session": session,
        "confirmation_pending": session.is_none(),
    })))
}

/// `POST /auth/login` - exchange credentials for a bearer session.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<AuthSession>> {
    let (email, password) = body.parse()?;
    Ok(Json(state.auth().sign_in(&email, password).await?))
}

/// `POST /auth/logout` - revoke the caller's session.
pub async fn logout(State(state): State<AppState>, user: CurrentUser) -> Result<Json<serde_json::Value>> {
    state.auth().sign_out(&user.access_token).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
