//! The remote store contract.
//!
//! Every table the services touch is reachable through [`CommerceStore`].
//! The trait keeps the services testable: the supabase crate implements it
//! against the hosted backend, the integration-tests crate in memory.
//!
//! Each method is one remote round trip. There are no transactions; callers
//! that need multi-step writes (checkout) sequence them and accept the
//! partial-failure window documented in the checkout service.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::records::{
    Cart, CartLine, NewOrder, NewOrderItem, Order, Product, ProductImageRow, ProductPatch,
    Profile, ShippingRate, ShippingRatePatch, SiteSetting,
};
use crate::types::{
    CartId, CartItemId, CartStatus, ProductId, ProductImageId, ShippingRateId, UserId,
};

/// Errors produced by a [`CommerceStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Any failure from the remote store (network, constraint, authorization).
    /// Carries the raw upstream message so the UI can show it.
    #[error("{0}")]
    Remote(String),

    /// The remote rejected the request with a 429.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A row that was expected to exist does not.
    #[error("not found: {0}")]
    NotFound(String),

    /// A row came back in a shape the records could not absorb.
    #[error("malformed row: {0}")]
    Malformed(String),
}

/// Typed access to the hosted relational store.
#[async_trait]
pub trait CommerceStore: Send + Sync {
    // --- products -----------------------------------------------------------

    /// Active products with embedded images, in fetch order.
    async fn active_products(&self) -> Result<Vec<Product>, StoreError>;

    /// One active product by slug, with embedded images.
    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError>;

    /// Current product record (live price and stock fields).
    async fn product(&self, id: ProductId) -> Result<Product, StoreError>;

    // --- carts --------------------------------------------------------------

    async fn find_active_cart(&self, user_id: UserId) -> Result<Option<Cart>, StoreError>;

    async fn insert_cart(&self, user_id: UserId) -> Result<Cart, StoreError>;

    async fn set_cart_status(&self, cart_id: CartId, status: CartStatus)
    -> Result<(), StoreError>;

    // --- cart items ---------------------------------------------------------

    /// Line items of a cart, each joined with minimal product info.
    async fn cart_lines(&self, cart_id: CartId) -> Result<Vec<CartLine>, StoreError>;

    /// Existing line for (cart, product), as `(line id, quantity)`.
    async fn find_cart_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<(CartItemId, i64)>, StoreError>;

    async fn update_cart_line(
        &self,
        item_id: CartItemId,
        qty: i64,
        unit_price: Decimal,
    ) -> Result<(), StoreError>;

    async fn insert_cart_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        qty: i64,
        unit_price: Decimal,
    ) -> Result<(), StoreError>;

    async fn delete_cart_line(&self, item_id: CartItemId) -> Result<(), StoreError>;

    /// Delete every line belonging to a cart.
    async fn clear_cart_lines(&self, cart_id: CartId) -> Result<(), StoreError>;

    // --- shipping rates -----------------------------------------------------

    /// Active shipping rates, optionally narrowed by exact province/city.
    async fn shipping_rates(
        &self,
        province: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<ShippingRate>, StoreError>;

    // --- orders -------------------------------------------------------------

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError>;

    async fn insert_order_items(&self, items: &[NewOrderItem]) -> Result<(), StoreError>;

    /// A user's orders, newest first.
    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError>;

    // --- profiles & settings ------------------------------------------------

    async fn profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError>;

    async fn site_settings(&self) -> Result<Vec<SiteSetting>, StoreError>;

    // --- admin --------------------------------------------------------------

    /// All products including inactive ones, ordered by title.
    async fn all_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn upsert_product(&self, patch: &ProductPatch) -> Result<Product, StoreError>;

    async fn set_product_active(&self, id: ProductId, active: bool) -> Result<(), StoreError>;

    async fn product_images(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductImageRow>, StoreError>;

    async fn insert_product_image(
        &self,
        product_id: ProductId,
        image_url: &str,
        sort_order: i64,
    ) -> Result<(), StoreError>;

    async fn update_product_image(
        &self,
        id: ProductImageId,
        image_url: &str,
        sort_order: i64,
    ) -> Result<(), StoreError>;

    async fn delete_product_image(&self, id: ProductImageId) -> Result<(), StoreError>;

    /// Every shipping rate, inactive ones included, ordered by route.
    async fn all_shipping_rates(&self) -> Result<Vec<ShippingRate>, StoreError>;

    async fn upsert_shipping_rate(&self, patch: &ShippingRatePatch) -> Result<(), StoreError>;

    async fn set_shipping_rate_active(
        &self,
        id: ShippingRateId,
        active: bool,
    ) -> Result<(), StoreError>;

    async fn delete_shipping_rate(&self, id: ShippingRateId) -> Result<(), StoreError>;

    /// Most recent orders across all users.
    async fn recent_orders(&self, limit: usize) -> Result<Vec<Order>, StoreError>;

    async fn upsert_site_setting(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn delete_site_setting(&self, key: &str) -> Result<(), StoreError>;
}
