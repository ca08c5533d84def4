//! Catalog route handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Serialize;

use arc_audio_core::{CommerceStore, Product};

use crate::error::{AppError, Result};
use crate::services::catalog::{self, CatalogFilter};
use crate::state::AppState;

/// Product detail payload with derived display fields.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub out_of_stock: bool,
    pub use_cases: Vec<&'static str>,
}

/// `GET /products` - the filtered, sorted product listing.
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<Vec<Product>>> {
    let products = state.catalog().await?;
    Ok(Json(catalog::apply(&products, &filter)))
}

/// `GET /products/colors` - distinct color options for the filter UI.
pub async fn colors(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let products = state.catalog().await?;
    Ok(Json(catalog::color_options(&products)))
}

/// `GET /products/{slug}` - product detail with ordered images.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = state
        .store()
        .product_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound(slug))?;

    Ok(Json(ProductDetail {
        out_of_stock: product.out_of_stock(),
        use_cases: catalog::use_case_labels(&product),
        product,
    }))
}
