//! Client for the hosted auth subsystem.
//!
//! Authentication is fully delegated: accounts, passwords, sessions and
//! email confirmation all live in the backend. This client only proxies
//! credentials and tokens. Sign-in attempts can be rate limited upstream;
//! a 429 surfaces as [`SupabaseError::RateLimited`] with the parsed
//! cooldown so the UI can disable the form and count down.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use arc_audio_core::{Email, UserId};

use crate::config::SupabaseConfig;
use crate::error::SupabaseError;

/// An authenticated user as reported by the auth subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// A bearer session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Result of a sign-up: the session is absent while email confirmation is
/// pending.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
}

/// Client for the auth endpoints.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl AuthClient {
    /// Create a new auth client using the anonymous key.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(AuthClientInner {
                http: reqwest::Client::new(),
                auth_url: format!("{}/auth/v1", config.url.trim_end_matches('/')),
                anon_key: config.anon_key.clone(),
            }),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::RateLimited`] on a 429, otherwise the
    /// upstream rejection message.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &Email, password: &str) -> Result<SignUp, SupabaseError> {
        let value = self
            .post(
                "signup",
                None,
                serde_json::json!({ "email": email.as_str(), "password": password }),
            )
            .await?;

        // With email confirmation enabled the response is a bare user; with
        // it disabled, a full session.
        if value.get("access_token").is_some() {
            let session: AuthSession = serde_json::from_value(value)?;
            return Ok(SignUp {
                user: Some(session.user.clone()),
                session: Some(session),
            });
        }
        let user: AuthUser = serde_json::from_value(value)?;
        Ok(SignUp {
            user: Some(user),
            session: None,
        })
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::RateLimited`] on a 429, otherwise the
    /// upstream rejection message (invalid credentials included).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<AuthSession, SupabaseError> {
        let value = self
            .post(
                "token?grant_type=password",
                None,
                serde_json::json!({ "email": email.as_str(), "password": password }),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Revoke the session behind `access_token`.
    ///
    /// # Errors
    ///
    /// Returns the upstream error if revocation fails.
    #[instrument(skip_all)]
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        self.post("logout", Some(access_token), serde_json::Value::Null)
            .await?;
        Ok(())
    }

    /// Resolve the user behind `access_token`; `None` when the token is
    /// missing, expired or revoked.
    ///
    /// # Errors
    ///
    /// Returns transport errors only; an unauthorized token is `Ok(None)`.
    #[instrument(skip_all)]
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, SupabaseError> {
        let response = self
            .inner
            .http
            .get(format!("{}/user", self.inner.auth_url))
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            let message = error_message(&response.text().await.unwrap_or_default());
            return Err(SupabaseError::from_status(status.as_u16(), message));
        }
        Ok(Some(serde_json::from_str(&response.text().await?)?))
    }

    async fn post(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, SupabaseError> {
        let mut request = self
            .inner
            .http
            .post(format!("{}/{path}", self.inner.auth_url))
            .header("apikey", &self.inner.anon_key);
        request = match bearer {
            Some(token) => request.bearer_auth(token),
            None => request.bearer_auth(&self.inner.anon_key),
        };
        if !body.is_null() {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(SupabaseError::from_status(
                status.as_u16(),
                error_message(&text),
            ));
        }
        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull the human-readable message out of an auth error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error_description", "msg", "message"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or_else(|| body.to_string())
}
