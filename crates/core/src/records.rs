//! Typed domain records.
//!
//! The hosted store returns loosely-typed JSON rows; everything crossing
//! that boundary is mapped into one of these records, with lenient handling
//! only where the stored data is genuinely messy (prices, stock counts).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{
    CartId, CartItemId, CartStatus, OrderId, OrderItemId, OrderStatus, ProductId, ProductImageId,
    ShippingRateId, UserId, parse_price,
};

/// Deserialize a price-like column that may be a number, a formatted string,
/// or null. Anything unparseable becomes `None`.
fn de_lenient_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse_price(&s),
        Some(other) if !other.is_null() => parse_price(&other.to_string()),
        _ => None,
    })
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Unique URL-safe identifier.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Longer copy shown on the detail page.
    #[serde(default)]
    pub detail_description: Option<String>,
    /// Promotional label; may encode a discount percentage ("Diskon 20%").
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_price")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub battery: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub latency: Option<String>,
    /// Whether available quantity is enforced.
    #[serde(default)]
    pub track_stock: bool,
    #[serde(default)]
    pub stock_qty: Option<i64>,
    /// `None` means active.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Embedded images, ordered by `sort_order` after fetch.
    #[serde(default, rename = "product_images")]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Tracked stock clamped to a non-negative count; untracked products
    /// report zero here but are always purchasable.
    #[must_use]
    pub fn effective_stock(&self) -> i64 {
        self.stock_qty.unwrap_or(0).max(0)
    }

    /// A tracked product with nothing left in stock.
    #[must_use]
    pub fn out_of_stock(&self) -> bool {
        self.track_stock && self.effective_stock() <= 0
    }

    /// `is_active` is nullable; only an explicit `false` hides the product.
    #[must_use]
    pub fn active(&self) -> bool {
        self.is_active != Some(false)
    }
}

/// An image embedded in a product row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub image_url: String,
    #[serde(default)]
    pub sort_order: i64,
}

/// A full product image row, as managed from the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImageRow {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub image_url: String,
    #[serde(default)]
    pub sort_order: i64,
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub status: CartStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Minimal product info joined onto a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// A cart line item with its joined product summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartItemId,
    pub qty: i64,
    /// Unit price captured at add-time, not live-linked to the product.
    pub unit_price: Decimal,
    pub product: ProductSummary,
}

impl CartLine {
    /// Quantity times captured unit price.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.qty.max(0))
    }
}

/// The active cart with its lines and aggregated totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub cart: Cart,
    pub items: Vec<CartLine>,
    pub total_qty: i64,
    pub total_amount: Decimal,
}

/// A flat shipping rate keyed by (province, city).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingRate {
    pub id: ShippingRateId,
    pub province: String,
    pub city: String,
    #[serde(default, deserialize_with = "de_lenient_price")]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An order created from a converted cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    #[serde(default)]
    pub order_number: Option<String>,
    pub subtotal_amount: Decimal,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
    #[serde(default)]
    pub shipping_province: Option<String>,
    #[serde(default)]
    pub shipping_city: Option<String>,
    /// Pipe-delimited recipient/phone/street/city/province, empty parts omitted.
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new order row.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub status: OrderStatus,
    pub order_number: Option<String>,
    pub subtotal_amount: Decimal,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
    pub shipping_province: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_address: Option<String>,
}

/// An immutable order line snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub qty: i64,
    pub unit_price: Decimal,
}

/// Insert payload for an order line.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub qty: i64,
    pub unit_price: Decimal,
}

/// A user profile row, used for the admin role lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub role: Option<String>,
}

impl Profile {
    /// Role comparison is trimmed and case-insensitive, as stored roles are
    /// free text.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|r| r.trim().eq_ignore_ascii_case("admin"))
    }
}

/// A free-form site settings entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSetting {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Upsert payload for a product, as edited from the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub track_stock: bool,
    #[serde(default)]
    pub stock_qty: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Upsert payload for a shipping rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingRatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShippingRateId>,
    pub province: String,
    pub city: String,
    pub cost: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_lenient_price_from_number() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "slug": "arc-eclipse",
            "title": "Arc Eclipse",
            "price": 249_000,
        }))
        .unwrap();
        assert_eq!(product.price, Some(Decimal::from(249_000)));
    }

    #[test]
    fn test_product_lenient_price_from_garbage() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "slug": "arc-eclipse",
            "title": "Arc Eclipse",
            "price": "hubungi kami",
        }))
        .unwrap();
        assert_eq!(product.price, None);
    }

    #[test]
    fn test_product_stock_helpers() {
        let mut product: Product = serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "slug": "arc-eclipse",
            "title": "Arc Eclipse",
            "track_stock": true,
            "stock_qty": -3,
        }))
        .unwrap();
        assert_eq!(product.effective_stock(), 0);
        assert!(product.out_of_stock());

        product.track_stock = false;
        assert!(!product.out_of_stock());
    }

    #[test]
    fn test_product_active_null_means_active() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "slug": "arc-eclipse",
            "title": "Arc Eclipse",
        }))
        .unwrap();
        assert!(product.active());
    }

    #[test]
    fn test_profile_role_is_trimmed_and_case_insensitive() {
        let profile = Profile {
            id: UserId::generate(),
            role: Some("  Admin ".to_string()),
        };
        assert!(profile.is_admin());

        let profile = Profile {
            id: UserId::generate(),
            role: Some("customer".to_string()),
        };
        assert!(!profile.is_admin());
    }

    #[test]
    fn test_cart_line_subtotal() {
        let line = CartLine {
            id: CartItemId::generate(),
            qty: 3,
            unit_price: Decimal::from(50_000),
            product: ProductSummary {
                id: ProductId::generate(),
                slug: "arc-mini".to_string(),
                title: "Arc Mini".to_string(),
                subtitle: None,
            },
        };
        assert_eq!(line.subtotal(), Decimal::from(150_000));
    }
}
