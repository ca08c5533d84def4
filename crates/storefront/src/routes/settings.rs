//! Site settings route handler.

use axum::Json;
use axum::extract::State;

use arc_audio_core::{CommerceStore, SiteSetting};

use crate::error::Result;
use crate::state::AppState;

/// `GET /settings` - public key/value settings (banner copy and the like).
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<SiteSetting>>> {
    Ok(Json(state.store().site_settings().await?))
}
