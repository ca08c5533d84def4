//! Integration tests for Arc Audio.
//!
//! The storefront services are generic over [`CommerceStore`], so the tests
//! in `tests/` run the real cart, shipping, checkout and catalog logic
//! against [`MemoryStore`], an in-memory store with the same observable
//! behavior as the hosted backend: no transactions, one round trip per
//! method.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p arc-audio-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use arc_audio_core::{
    Cart, CartId, CartItemId, CartLine, CartStatus, CommerceStore, NewOrder, NewOrderItem, Order,
    OrderId, OrderItem, OrderItemId, Product, ProductId, ProductImageId, ProductImageRow,
    ProductPatch, ProductSummary, Profile, ShippingRate, ShippingRateId, ShippingRatePatch,
    SiteSetting, StoreError, UserId,
};

/// Build a minimal product for seeding; fields not under test stay empty.
#[must_use]
pub fn test_product(slug: &str, title: &str, price: Option<i64>) -> Product {
    Product {
        id: ProductId::generate(),
        slug: slug.to_string(),
        title: title.to_string(),
        subtitle: None,
        description: None,
        detail_description: None,
        badge: None,
        price: price.map(Decimal::from),
        color: None,
        battery: None,
        weight: None,
        latency: None,
        track_stock: false,
        stock_qty: None,
        is_active: None,
        images: Vec::new(),
    }
}

struct LineRow {
    id: CartItemId,
    cart_id: CartId,
    product_id: ProductId,
    qty: i64,
    unit_price: Decimal,
}

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    carts: Vec<Cart>,
    lines: Vec<LineRow>,
    rates: Vec<ShippingRate>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    profiles: Vec<Profile>,
    settings: Vec<SiteSetting>,
    images: Vec<ProductImageRow>,
}

/// In-memory [`CommerceStore`] for tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_product(&self, product: Product) -> ProductId {
        let id = product.id;
        self.lock().products.push(product);
        id
    }

    pub fn seed_rate(&self, province: &str, city: &str, cost: i64, active: bool) {
        self.lock().rates.push(ShippingRate {
            id: ShippingRateId::generate(),
            province: province.to_string(),
            city: city.to_string(),
            cost: Some(Decimal::from(cost)),
            is_active: active,
            updated_at: None,
        });
    }

    pub fn seed_profile(&self, user_id: UserId, role: &str) {
        self.lock().profiles.push(Profile {
            id: user_id,
            role: Some(role.to_string()),
        });
    }

    /// Snapshot of all carts, in insertion order.
    #[must_use]
    pub fn carts(&self) -> Vec<Cart> {
        self.lock().carts.clone()
    }

    /// Snapshot of all orders, in insertion order.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    /// Snapshot of all order line items, in insertion order.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.lock().order_items.clone()
    }

    /// Total cart line rows across all carts.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lock().lines.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("store lock poisoned")
    }

    fn summary(inner: &Inner, product_id: ProductId) -> ProductSummary {
        inner
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map_or_else(
                || ProductSummary {
                    id: product_id,
                    slug: String::new(),
                    title: String::new(),
                    subtitle: None,
                },
                |p| ProductSummary {
                    id: p.id,
                    slug: p.slug.clone(),
                    title: p.title.clone(),
                    subtitle: p.subtitle.clone(),
                },
            )
    }
}

#[async_trait]
impl CommerceStore for MemoryStore {
    async fn active_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| p.active())
            .cloned()
            .collect())
    }

    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        Ok(self
            .lock()
            .products
            .iter()
            .find(|p| p.slug == slug && p.active())
            .cloned())
    }

    async fn product(&self, id: ProductId) -> Result<Product, StoreError> {
        self.lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("products".to_string()))
    }

    async fn find_active_cart(&self, user_id: UserId) -> Result<Option<Cart>, StoreError> {
        Ok(self
            .lock()
            .carts
            .iter()
            .find(|c| c.user_id == user_id && c.status == CartStatus::Active)
            .cloned())
    }

    async fn insert_cart(&self, user_id: UserId) -> Result<Cart, StoreError> {
        let cart = Cart {
            id: CartId::generate(),
            user_id,
            status: CartStatus::Active,
            created_at: Some(Utc::now()),
        };
        self.lock().carts.push(cart.clone());
        Ok(cart)
    }

    async fn set_cart_status(
        &self,
        cart_id: CartId,
        status: CartStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let cart = inner
            .carts
            .iter_mut()
            .find(|c| c.id == cart_id)
            .ok_or_else(|| StoreError::NotFound("carts".to_string()))?;
        cart.status = status;
        Ok(())
    }

    async fn cart_lines(&self, cart_id: CartId) -> Result<Vec<CartLine>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .lines
            .iter()
            .filter(|l| l.cart_id == cart_id)
            .map(|l| CartLine {
                id: l.id,
                qty: l.qty,
                unit_price: l.unit_price,
                product: Self::summary(&inner, l.product_id),
            })
            .collect())
    }

    async fn find_cart_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<(CartItemId, i64)>, StoreError> {
        Ok(self
            .lock()
            .lines
            .iter()
            .find(|l| l.cart_id == cart_id && l.product_id == product_id)
            .map(|l| (l.id, l.qty)))
    }

    async fn update_cart_line(
        &self,
        item_id: CartItemId,
        qty: i64,
        unit_price: Decimal,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let line = inner
            .lines
            .iter_mut()
            .find(|l| l.id == item_id)
            .ok_or_else(|| StoreError::NotFound("cart_items".to_string()))?;
        line.qty = qty;
        line.unit_price = unit_price;
        Ok(())
    }

    async fn insert_cart_line(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        qty: i64,
        unit_price: Decimal,
    ) -> Result<(), StoreError> {
        self.lock().lines.push(LineRow {
            id: CartItemId::generate(),
            cart_id,
            product_id,
            qty,
            unit_price,
        });
        Ok(())
    }

    async fn delete_cart_line(&self, item_id: CartItemId) -> Result<(), StoreError> {
        self.lock().lines.retain(|l| l.id != item_id);
        Ok(())
    }

    async fn clear_cart_lines(&self, cart_id: CartId) -> Result<(), StoreError> {
        self.lock().lines.retain(|l| l.cart_id != cart_id);
        Ok(())
    }

    async fn shipping_rates(
        &self,
        province: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<ShippingRate>, StoreError> {
        let mut rates: Vec<ShippingRate> = self
            .lock()
            .rates
            .iter()
            .filter(|r| r.is_active)
            .filter(|r| province.is_none_or(|p| r.province == p))
            .filter(|r| city.is_none_or(|c| r.city == c))
            .cloned()
            .collect();
        rates.sort_by(|a, b| (&a.province, &a.city).cmp(&(&b.province, &b.city)));
        Ok(rates)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError> {
        let row = Order {
            id: OrderId::generate(),
            user_id: order.user_id,
            status: order.status,
            order_number: order.order_number.clone(),
            subtotal_amount: order.subtotal_amount,
            shipping_cost: order.shipping_cost,
            total_amount: order.total_amount,
            shipping_province: order.shipping_province.clone(),
            shipping_city: order.shipping_city.clone(),
            shipping_address: order.shipping_address.clone(),
            created_at: Some(Utc::now()),
        };
        self.lock().orders.push(row.clone());
        Ok(row)
    }

    async fn insert_order_items(&self, items: &[NewOrderItem]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        for item in items {
            inner.order_items.push(OrderItem {
                id: OrderItemId::generate(),
                order_id: item.order_id,
                product_id: item.product_id,
                qty: item.qty,
                unit_price: item.unit_price,
            });
        }
        Ok(())
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .lock()
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.reverse();
        Ok(orders)
    }

    async fn profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .lock()
            .profiles
            .iter()
            .find(|p| p.id == user_id)
            .cloned())
    }

    async fn site_settings(&self) -> Result<Vec<SiteSetting>, StoreError> {
        let mut settings = self.lock().settings.clone();
        settings.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(settings)
    }

    async fn all_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products = self.lock().products.clone();
        products.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(products)
    }

    async fn upsert_product(&self, patch: &ProductPatch) -> Result<Product, StoreError> {
        let mut inner = self.lock();
        let existing = inner.products.iter_mut().find(|p| {
            patch.id.is_some_and(|id| p.id == id) || (patch.id.is_none() && p.slug == patch.slug)
        });
        if let Some(product) = existing {
            product.title = patch.title.clone();
            product.slug = patch.slug.clone();
            product.subtitle = patch.subtitle.clone();
            product.badge = patch.badge.clone();
            product.price = patch.price;
            product.track_stock = patch.track_stock;
            product.stock_qty = Some(patch.stock_qty);
            if let Some(active) = patch.is_active {
                product.is_active = Some(active);
            }
            return Ok(product.clone());
        }
        let mut product = test_product(&patch.slug, &patch.title, None);
        product.subtitle = patch.subtitle.clone();
        product.badge = patch.badge.clone();
        product.price = patch.price;
        product.track_stock = patch.track_stock;
        product.stock_qty = Some(patch.stock_qty);
        product.is_active = patch.is_active;
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn set_product_active(&self, id: ProductId, active: bool) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound("products".to_string()))?;
        product.is_active = Some(active);
        Ok(())
    }

    async fn product_images(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductImageRow>, StoreError> {
        let mut images: Vec<ProductImageRow> = self
            .lock()
            .images
            .iter()
            .filter(|i| i.product_id == product_id)
            .cloned()
            .collect();
        images.sort_by_key(|i| i.sort_order);
        Ok(images)
    }

    async fn insert_product_image(
        &self,
        product_id: ProductId,
        image_url: &str,
        sort_order: i64,
    ) -> Result<(), StoreError> {
        self.lock().images.push(ProductImageRow {
            id: ProductImageId::generate(),
            product_id,
            image_url: image_url.to_string(),
            sort_order,
        });
        Ok(())
    }

    async fn update_product_image(
        &self,
        id: ProductImageId,
        image_url: &str,
        sort_order: i64,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let image = inner
            .images
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound("product_images".to_string()))?;
        image.image_url = image_url.to_string();
        image.sort_order = sort_order;
        Ok(())
    }

    async fn delete_product_image(&self, id: ProductImageId) -> Result<(), StoreError> {
        self.lock().images.retain(|i| i.id != id);
        Ok(())
    }

    async fn all_shipping_rates(&self) -> Result<Vec<ShippingRate>, StoreError> {
        let mut rates = self.lock().rates.clone();
        rates.sort_by(|a, b| (&a.province, &a.city).cmp(&(&b.province, &b.city)));
        Ok(rates)
    }

    async fn upsert_shipping_rate(&self, patch: &ShippingRatePatch) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let existing = inner.rates.iter_mut().find(|r| {
            patch.id.is_some_and(|id| r.id == id)
                || (patch.id.is_none() && r.province == patch.province && r.city == patch.city)
        });
        if let Some(rate) = existing {
            rate.province = patch.province.clone();
            rate.city = patch.city.clone();
            rate.cost = Some(patch.cost);
            rate.is_active = patch.is_active;
            rate.updated_at = Some(Utc::now());
            return Ok(());
        }
        inner.rates.push(ShippingRate {
            id: patch.id.unwrap_or_else(ShippingRateId::generate),
            province: patch.province.clone(),
            city: patch.city.clone(),
            cost: Some(patch.cost),
            is_active: patch.is_active,
            updated_at: Some(Utc::now()),
        });
        Ok(())
    }

    async fn set_shipping_rate_active(
        &self,
        id: ShippingRateId,
        active: bool,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let rate = inner
            .rates
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound("shipping_rates".to_string()))?;
        rate.is_active = active;
        Ok(())
    }

    async fn delete_shipping_rate(&self, id: ShippingRateId) -> Result<(), StoreError> {
        self.lock().rates.retain(|r| r.id != id);
        Ok(())
    }

    async fn recent_orders(&self, limit: usize) -> Result<Vec<Order>, StoreError> {
        let mut orders = self.lock().orders.clone();
        orders.reverse();
        orders.truncate(limit);
        Ok(orders)
    }

    async fn upsert_site_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if let Some(setting) = inner.settings.iter_mut().find(|s| s.key == key) {
            setting.value = Some(value.to_string());
            setting.updated_at = Some(Utc::now());
            return Ok(());
        }
        inner.settings.push(SiteSetting {
            key: key.to_string(),
            value: Some(value.to_string()),
            updated_at: Some(Utc::now()),
        });
        Ok(())
    }

    async fn delete_site_setting(&self, key: &str) -> Result<(), StoreError> {
        self.lock().settings.retain(|s| s.key != key);
        Ok(())
    }
}
