//! Site settings route handlers.
//!
//! Free-form key/value pairs the storefront reads for display copy, e.g.
//! `home_banner_text` and `home_banner_cta`.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use arc_audio_core::{CommerceStore, SiteSetting};

use crate::error::{AdminError, Result};
use crate::middleware::AdminUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SettingBody {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// `GET /settings` - all settings, ordered by key.
pub async fn index(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<SiteSetting>>> {
    Ok(Json(state.store().site_settings().await?))
}

/// `POST /settings` - create or update a setting.
pub async fn upsert(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<SettingBody>,
) -> Result<Json<serde_json::Value>> {
    let key = body.key.trim();
    if key.is_empty() {
        return Err(AdminError::Validation("key is required".to_string()));
    }
    state.store().upsert_site_setting(key, &body.value).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `DELETE /settings/{key}` - delete a setting.
pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state.store().delete_site_setting(&key).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
