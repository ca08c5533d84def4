//! Product management route handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use arc_audio_core::{
    CommerceStore, Product, ProductId, ProductImageId, ProductImageRow, ProductPatch,
};

use crate::error::{AdminError, Result};
use crate::middleware::AdminUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetActive {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct ImageBody {
    pub image_url: String,
    #[serde(default)]
    pub sort_order: i64,
}

/// `GET /products` - every product, hidden ones included, ordered by title.
pub async fn index(State(state): State<AppState>, _admin: AdminUser) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.store().all_products().await?))
}

/// `POST /products` - create or update a product.
///
/// Title and slug are validated before anything reaches the store; a
/// product that does not track stock always stores a zero quantity.
pub async fn upsert(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(mut patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    patch.title = patch.title.trim().to_string();
    patch.slug = patch.slug.trim().to_string();
    if patch.title.is_empty() {
        return Err(AdminError::Validation("title is required".to_string()));
    }
    if patch.slug.is_empty() {
        return Err(AdminError::Validation("slug is required".to_string()));
    }
    if !patch.track_stock {
        patch.stock_qty = 0;
    }

    let product = state.store().upsert_product(&patch).await?;
    tracing::info!(admin = %admin.id, product = %product.id, slug = %product.slug, "product upserted");
    Ok(Json(product))
}

/// `POST /products/{id}/active` - show or hide a product on the storefront.
pub async fn set_active(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<ProductId>,
    Json(body): Json<SetActive>,
) -> Result<Json<serde_json::Value>> {
    state.store().set_product_active(id, body.active).await?;
    tracing::info!(admin = %admin.id, product = %id, active = body.active, "product visibility changed");
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /products/{id}/images` - images for one product, in display order.
pub async fn images(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<ProductImageRow>>> {
    Ok(Json(state.store().product_images(id).await?))
}

/// `POST /products/{id}/images` - attach an image.
pub async fn add_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ProductId>,
    Json(body): Json<ImageBody>,
) -> Result<Json<serde_json::Value>> {
    let url = body.image_url.trim();
    if url.is_empty() {
        return Err(AdminError::Validation("image_url is required".to_string()));
    }
    state
        .store()
        .insert_product_image(id, url, body.sort_order)
        .await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /images/{id}` - update an image's URL or position.
pub async fn update_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ProductImageId>,
    Json(body): Json<ImageBody>,
) -> Result<Json<serde_json::Value>> {
    let url = body.image_url.trim();
    if url.is_empty() {
        return Err(AdminError::Validation("image_url is required".to_string()));
    }
    state
        .store()
        .update_product_image(id, url, body.sort_order)
        .await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `DELETE /images/{id}` - delete an image.
pub async fn delete_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<ProductImageId>,
) -> Result<Json<serde_json::Value>> {
    state.store().delete_product_image(id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
