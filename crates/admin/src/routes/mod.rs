//! HTTP route handlers for the admin console API.
//!
//! Every route requires a bearer token resolving to a profile with the
//! `admin` role.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                     - Liveness check
//! GET    /health/ready               - Readiness check
//!
//! # Products
//! GET    /products                   - All products, ordered by title
//! POST   /products                   - Create or update a product
//! POST   /products/{id}/active       - Show or hide a product
//! GET    /products/{id}/images       - Images for a product
//! POST   /products/{id}/images       - Add an image
//! POST   /images/{id}                - Update an image
//! DELETE /images/{id}                - Delete an image
//!
//! # Shipping rates
//! GET    /shipping-rates             - All rates, inactive included
//! POST   /shipping-rates             - Create or update a rate
//! POST   /shipping-rates/{id}/active - Enable or disable a rate
//! DELETE /shipping-rates/{id}        - Delete a rate
//!
//! # Site settings
//! GET    /settings                   - All settings
//! POST   /settings                   - Create or update a setting
//! DELETE /settings/{key}             - Delete a setting
//!
//! # Orders
//! GET    /orders                     - Recent orders across all users
//! ```

pub mod orders;
pub mod products;
pub mod rates;
pub mod settings;

use axum::Router;
use axum::routing::{delete, get, post};

use crate::state::AppState;

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::upsert))
        .route("/products/{id}/active", post(products::set_active))
        .route(
            "/products/{id}/images",
            get(products::images).post(products::add_image),
        )
        .route(
            "/images/{id}",
            post(products::update_image).delete(products::delete_image),
        )
        .route("/shipping-rates", get(rates::index).post(rates::upsert))
        .route("/shipping-rates/{id}/active", post(rates::set_active))
        .route("/shipping-rates/{id}", delete(rates::remove))
        .route("/settings", get(settings::index).post(settings::upsert))
        .route("/settings/{key}", delete(settings::remove))
        .route("/orders", get(orders::index))
}
