//! Cart route handlers.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use arc_audio_core::{CartItemId, CartSnapshot, ProductId};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::services::cart;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub product_id: ProductId,
    #[serde(default = "default_qty")]
    pub qty: i64,
}

const fn default_qty() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct RemoveFromCart {
    pub item_id: CartItemId,
}

/// `GET /cart` - the active cart snapshot, creating the cart if needed.
pub async fn show(State(state): State<AppState>, user: CurrentUser) -> Result<Json<CartSnapshot>> {
    Ok(Json(cart::cart_snapshot(state.store(), user.id).await?))
}

/// `POST /cart/add` - add a product to the active cart.
pub async fn add(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<AddToCart>,
) -> Result<Json<CartSnapshot>> {
    let snapshot = cart::add_to_cart(state.store(), user.id, body.product_id, body.qty).await?;
    Ok(Json(snapshot))
}

/// `POST /cart/remove` - delete one line item.
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<RemoveFromCart>,
) -> Result<Json<CartSnapshot>> {
    Ok(Json(
        cart::remove_cart_item(state.store(), user.id, body.item_id).await?,
    ))
}
