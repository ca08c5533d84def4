//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the store)
//!
//! # Catalog
//! GET  /products               - Filtered and sorted product listing
//! GET  /products/colors        - Distinct color filter options
//! GET  /products/{slug}        - Product detail
//!
//! # Session-local selections
//! GET  /wishlist               - Wishlisted product ids
//! POST /wishlist/toggle        - Toggle a product in the wishlist
//! GET  /compare                - Compare tray product ids
//! POST /compare/toggle         - Toggle a product in the compare tray
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart snapshot
//! POST /cart/add               - Add a product
//! POST /cart/remove            - Remove a line item
//!
//! # Shipping
//! GET  /shipping/provinces     - Provinces with active rates
//! GET  /shipping/cities        - Cities for a province
//! GET  /shipping/cost          - Cost for a province/city pair
//!
//! # Checkout (requires auth)
//! POST /checkout               - Convert the cart into a pending order
//!
//! # Orders (requires auth)
//! GET  /orders                 - Order history, newest first
//!
//! # Auth
//! POST /auth/register          - Create an account
//! POST /auth/login             - Exchange credentials for a session
//! POST /auth/logout            - Revoke the session
//!
//! # Site settings
//! GET  /settings               - Public key/value settings
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod selections;
pub mod settings;
pub mod shipping;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::index))
        .route("/products/colors", get(catalog::colors))
        .route("/products/{slug}", get(catalog::show))
        .route("/wishlist", get(selections::wishlist))
        .route("/wishlist/toggle", post(selections::toggle_wishlist))
        .route("/compare", get(selections::compare))
        .route("/compare/toggle", post(selections::toggle_compare))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/remove", post(cart::remove))
        .route("/shipping/provinces", get(shipping::provinces))
        .route("/shipping/cities", get(shipping::cities))
        .route("/shipping/cost", get(shipping::cost))
        .route("/checkout", post(checkout::checkout))
        .route("/orders", get(orders::index))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/settings", get(settings::index))
}
