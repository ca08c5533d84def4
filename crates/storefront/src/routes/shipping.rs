//! Shipping rate route handlers.

use axum::Json;
use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::shipping;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CitiesQuery {
    #[serde(default)]
    pub province: String,
}

#[derive(Debug, Deserialize)]
pub struct CostQuery {
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct CostResponse {
    pub cost: Decimal,
}

/// `GET /shipping/provinces` - provinces with at least one active rate.
pub async fn provinces(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(shipping::provinces(state.store()).await?))
}

/// `GET /shipping/cities` - cities with an active rate in the province.
pub async fn cities(
    State(state): State<AppState>,
    Query(query): Query<CitiesQuery>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(shipping::cities(state.store(), &query.province).await?))
}

/// `GET /shipping/cost` - resolved cost; zero for blank or unmatched routes.
pub async fn cost(
    State(state): State<AppState>,
    Query(query): Query<CostQuery>,
) -> Result<Json<CostResponse>> {
    let cost = shipping::cost(state.store(), &query.province, &query.city).await?;
    Ok(Json(CostResponse { cost }))
}
