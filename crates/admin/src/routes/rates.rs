//! Shipping rate management route handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use arc_audio_core::{CommerceStore, ShippingRate, ShippingRateId, ShippingRatePatch};

use crate::error::{AdminError, Result};
use crate::middleware::AdminUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetActive {
    pub active: bool,
}

/// `GET /shipping-rates` - every rate, disabled ones included.
pub async fn index(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<ShippingRate>>> {
    Ok(Json(state.store().all_shipping_rates().await?))
}

/// `POST /shipping-rates` - create or update a rate.
pub async fn upsert(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(mut patch): Json<ShippingRatePatch>,
) -> Result<Json<serde_json::Value>> {
    patch.province = patch.province.trim().to_string();
    patch.city = patch.city.trim().to_string();
    if patch.province.is_empty() {
        return Err(AdminError::Validation("province is required".to_string()));
    }
    if patch.city.is_empty() {
        return Err(AdminError::Validation("city is required".to_string()));
    }

    state.store().upsert_shipping_rate(&patch).await?;
    tracing::info!(
        admin = %admin.id,
        province = %patch.province,
        city = %patch.city,
        cost = %patch.cost,
        "shipping rate upserted"
    );
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /shipping-rates/{id}/active` - enable or disable a rate.
pub async fn set_active(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ShippingRateId>,
    Json(body): Json<SetActive>,
) -> Result<Json<serde_json::Value>> {
    state
        .store()
        .set_shipping_rate_active(id, body.active)
        .await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `DELETE /shipping-rates/{id}` - delete a rate.
pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ShippingRateId>,
) -> Result<Json<serde_json::Value>> {
    state.store().delete_shipping_rate(id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
