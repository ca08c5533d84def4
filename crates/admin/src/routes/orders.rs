//! Order overview route handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use arc_audio_core::{CommerceStore, Order};

use crate::error::Result;
use crate::middleware::AdminUser;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// `GET /orders` - most recent orders across all users.
pub async fn index(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<Order>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    Ok(Json(state.store().recent_orders(limit).await?))
}
