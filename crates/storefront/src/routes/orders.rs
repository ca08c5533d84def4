//! Order history route handlers.

use axum::Json;
use axum::extract::State;

use arc_audio_core::{CommerceStore, Order};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// `GET /orders` - the buyer's orders, newest first.
pub async fn index(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.store().orders_for_user(user.id).await?))
}
