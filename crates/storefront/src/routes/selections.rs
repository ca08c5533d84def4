//! Wishlist and compare tray route handlers.
//!
//! Both selections are session-local; no account is needed to use them.

use axum::Json;
use serde::Deserialize;
use tower_sessions::Session;

use arc_audio_core::ProductId;

use crate::error::Result;
use crate::middleware::session::{COMPARE_KEY, WISHLIST_KEY};
use crate::services::compare::{self as tray, CompareChange};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub product_id: ProductId,
}

/// `GET /wishlist` - wishlisted product ids.
pub async fn wishlist(session: Session) -> Result<Json<Vec<ProductId>>> {
    Ok(Json(load(&session, WISHLIST_KEY).await?))
}

/// `POST /wishlist/toggle` - add or remove a product from the wishlist.
pub async fn toggle_wishlist(
    session: Session,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut ids = load(&session, WISHLIST_KEY).await?;
    let added = tray::toggle_wishlist(&mut ids, body.product_id);
    session.insert(WISHLIST_KEY, &ids).await?;
    Ok(Json(serde_json::json!({
        "added": added,
        "wishlist": ids,
    })))
}

/// `GET /compare` - compare tray product ids.
pub async fn compare(session: Session) -> Result<Json<Vec<ProductId>>> {
    Ok(Json(load(&session, COMPARE_KEY).await?))
}

/// `POST /compare/toggle` - add or remove a product from the compare tray.
///
/// A full tray reports `change: "full"` and stays unchanged.
pub async fn toggle_compare(
    session: Session,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut ids = load(&session, COMPARE_KEY).await?;
    let change = tray::toggle_compare(&mut ids, body.product_id);
    if change != CompareChange::Full {
        session.insert(COMPARE_KEY, &ids).await?;
    }
    Ok(Json(serde_json::json!({
        "change": change,
        "compare": ids,
    })))
}

async fn load(session: &Session, key: &str) -> Result<Vec<ProductId>> {
    Ok(session.get(key).await?.unwrap_or_default())
}
