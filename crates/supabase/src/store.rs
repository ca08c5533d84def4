//! [`CommerceStore`] implementation over the hosted REST surface.
//!
//! This is the boundary where loosely-typed rows become typed records.
//! Column lists match what each caller actually reads; embedded resources
//! (`product_images`, the cart line's product summary) ride along in the
//! `select` projection.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use arc_audio_core::{
    Cart, CartId, CartItemId, CartLine, CartStatus, CommerceStore, NewOrder, NewOrderItem, Order,
    Product, ProductId, ProductImageId, ProductImageRow, ProductPatch, Profile, ShippingRate,
    ShippingRateId, ShippingRatePatch, SiteSetting, StoreError, UserId,
};

use crate::config::SupabaseConfig;
use crate::postgrest::PostgrestClient;

const PRODUCT_COLUMNS: &str = "id, slug, title, subtitle, description, detail_description, \
     badge, price, color, battery, weight, latency, track_stock, stock_qty, is_active, \
     product_images(image_url, sort_order)";

const ORDER_COLUMNS: &str = "id, user_id, status, order_number, subtotal_amount, \
     shipping_cost, total_amount, shipping_province, shipping_city, shipping_address, created_at";

/// The hosted store.
#[derive(Clone)]
pub struct SupabaseStore {
    client: PostgrestClient,
}

impl SupabaseStore {
    /// Create a store client from configuration.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: PostgrestClient::new(config),
        }
    }

    /// Cheap readiness probe: one row from the settings table.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`StoreError`] when the store is unreachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .from("site_settings")
            .select("key")
            .limit(1)
            .fetch::<SiteSetting>()
            .await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct CartLineRef {
    id: CartItemId,
    qty: i64,
}

#[async_trait]
impl CommerceStore for SupabaseStore {
    async fn active_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self
            .client
            .from("products")
            .select(PRODUCT_COLUMNS)
            .or("is_active.is.null,is_active.eq.true")
            .fetch()
            .await?;
        for product in &mut products {
            product.images.sort_by_key(|img| img.sort_order);
        }
        Ok(products)
    }

    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let product: Option<Product> = self
            .client
            .from("products")
            .select(PRODUCT_COLUMNS)
            .eq("slug", slug)
            .or("is_active.is.null,is_active.eq.true")
            .maybe_single()
            .await?;
        Ok(product.map(|mut p| {
            p.images.sort_by_key(|img| img.sort_order);
            p
        }))
    }

    async fn product(&self, id: ProductId) -> Result<Product, StoreError> {
        Ok(self
            .client
            .from("products")
            .select("id, slug, title, price, track_stock, stock_qty")
            .eq("id", id)
            .single()
            .await?)
    }

    async fn find_active_cart(&self, user_id: UserId) -> Result<Option<Cart>, StoreError> {
        Ok(self
            .client
            .from("carts")
            .select("id, user_id, status, created_at")
            .eq("user_id", user_id)
            .eq("status", CartStatus::Active.as_str())
            .maybe_single()
            .await?)
    }

    async fn insert_cart(&self, user_id: UserId) -> Result<Cart, StoreError> {
        Ok(self
            .client
            .from("carts")
            .insert_single(&serde_json::json!({
                "user_id": user_id,
                "status": CartStatus::Active.as_str(),
            }))
            .await?)
    }

    async fn set_cart_status(
        &self,
        cart_id: CartId,
        status: CartStatus,
    ) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("carts")
            .eq("id", cart_id)
            .update(&serde_json::json!({ "status": status.as_str() }))
            .await?)
    }

    async fn cart_lines(&self, cart_id: CartId) -> Result<Vec<CartLine>, StoreError> {
        Ok(self
            .client
            .from("cart_items")
            .select("id, qty, unit_price, product:products(id, slug, title, subtitle)")
            .eq("cart_id", cart_id)
            .fetch()
            .await?)
    }

    async fn find_cart_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<(CartItemId, i64)>, StoreError> {
        let line: Option<CartLineRef> = self
            .client
            .from("cart_items")
            .select("id, qty")
            .eq("cart_id", cart_id)
            .eq("product_id", product_id)
            .maybe_single()
            .await?;
        Ok(line.map(|l| (l.id, l.qty)))
    }

    async fn update_cart_line(
        &self,
        item_id: CartItemId,
        qty: i64,
        unit_price: Decimal,
    ) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("cart_items")
            .eq("id", item_id)
            .update(&serde_json::json!({ "qty": qty, "unit_price": unit_price }))
            .await?)
    }

    async fn insert_cart_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        qty: i64,
        unit_price: Decimal,
    ) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("cart_items")
            .insert_only(&serde_json::json!({
                "cart_id": cart_id,
                "product_id": product_id,
                "qty": qty,
                "unit_price": unit_price,
            }))
            .await?)
    }

    async fn delete_cart_line(&self, item_id: CartItemId) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("cart_items")
            .eq("id", item_id)
            .delete()
            .await?)
    }

    async fn clear_cart_lines(&self, cart_id: CartId) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("cart_items")
            .eq("cart_id", cart_id)
            .delete()
            .await?)
    }

    async fn shipping_rates(
        &self,
        province: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<ShippingRate>, StoreError> {
        let mut query = self
            .client
            .from("shipping_rates")
            .select("id, province, city, cost, is_active, updated_at")
            .eq("is_active", true)
            .order("province", true)
            .order("city", true);
        if let Some(province) = province {
            query = query.eq("province", province);
        }
        if let Some(city) = city {
            query = query.eq("city", city);
        }
        Ok(query.fetch().await?)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError> {
        Ok(self.client.from("orders").insert_single(order).await?)
    }

    async fn insert_order_items(&self, items: &[NewOrderItem]) -> Result<(), StoreError> {
        if items.is_empty() {
            return Ok(());
        }
        Ok(self.client.from("order_items").insert_only(&items).await?)
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .client
            .from("orders")
            .select(ORDER_COLUMNS)
            .eq("user_id", user_id)
            .order("created_at", false)
            .fetch()
            .await?)
    }

    async fn profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .client
            .from("profiles")
            .select("id, role")
            .eq("id", user_id)
            .maybe_single()
            .await?)
    }

    async fn site_settings(&self) -> Result<Vec<SiteSetting>, StoreError> {
        Ok(self
            .client
            .from("site_settings")
            .select("key, value, updated_at")
            .order("key", true)
            .fetch()
            .await?)
    }

    async fn all_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .client
            .from("products")
            .select("id, slug, title, subtitle, badge, price, stock_qty, track_stock, is_active")
            .order("title", true)
            .fetch()
            .await?)
    }

    async fn upsert_product(&self, patch: &ProductPatch) -> Result<Product, StoreError> {
        let mut rows: Vec<Product> = self.client.from("products").upsert(patch).await?;
        rows.pop()
            .ok_or_else(|| StoreError::NotFound("products".to_string()))
    }

    async fn set_product_active(&self, id: ProductId, active: bool) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("products")
            .eq("id", id)
            .update(&serde_json::json!({ "is_active": active }))
            .await?)
    }

    async fn product_images(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductImageRow>, StoreError> {
        Ok(self
            .client
            .from("product_images")
            .select("id, product_id, image_url, sort_order")
            .eq("product_id", product_id)
            .order("sort_order", true)
            .fetch()
            .await?)
    }

    async fn insert_product_image(
        &self,
        product_id: ProductId,
        image_url: &str,
        sort_order: i64,
    ) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("product_images")
            .insert_only(&serde_json::json!({
                "product_id": product_id,
                "image_url": image_url,
                "sort_order": sort_order,
            }))
            .await?)
    }

    async fn update_product_image(
        &self,
        id: ProductImageId,
        image_url: &str,
        sort_order: i64,
    ) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("product_images")
            .eq("id", id)
            .update(&serde_json::json!({
                "image_url": image_url,
                "sort_order": sort_order,
            }))
            .await?)
    }

    async fn delete_product_image(&self, id: ProductImageId) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("product_images")
            .eq("id", id)
            .delete()
            .await?)
    }

    async fn all_shipping_rates(&self) -> Result<Vec<ShippingRate>, StoreError> {
        Ok(self
            .client
            .from("shipping_rates")
            .select("id, province, city, cost, is_active, updated_at")
            .order("province", true)
            .order("city", true)
            .fetch()
            .await?)
    }

    async fn upsert_shipping_rate(&self, patch: &ShippingRatePatch) -> Result<(), StoreError> {
        Ok(self.client.from("shipping_rates").upsert_only(patch).await?)
    }

    async fn set_shipping_rate_active(
        &self,
        id: ShippingRateId,
        active: bool,
    ) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("shipping_rates")
            .eq("id", id)
            .update(&serde_json::json!({ "is_active": active }))
            .await?)
    }

    async fn delete_shipping_rate(&self, id: ShippingRateId) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("shipping_rates")
            .eq("id", id)
            .delete()
            .await?)
    }

    async fn recent_orders(&self, limit: usize) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .client
            .from("orders")
            .select(ORDER_COLUMNS)
            .order("created_at", false)
            .limit(limit)
            .fetch()
            .await?)
    }

    async fn upsert_site_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("site_settings")
            .upsert_only(&serde_json::json!({ "key": key, "value": value }))
            .await?)
    }

    async fn delete_site_setting(&self, key: &str) -> Result<(), StoreError> {
        Ok(self
            .client
            .from("site_settings")
            .eq("key", key)
            .delete()
            .await?)
    }
}
