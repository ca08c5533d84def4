//! Checkout orchestration.
//!
//! Converts the active cart into a pending order in a fixed sequence of
//! store writes. The store offers no transactions, so a failure mid-sequence
//! leaves earlier writes in place; every error is tagged with the step it
//! happened at so operators can reconcile by hand.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use arc_audio_core::{
    CartStatus, CommerceStore, NewOrder, NewOrderItem, Order, OrderStatus, StoreError, UserId,
};

use crate::services::{cart, shipping};

/// Where in the checkout sequence a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Snapshot,
    ResolveShipping,
    CreateOrder,
    CreateOrderItems,
    RetireCart,
    ClearCartItems,
    ProvisionNextCart,
}

impl CheckoutStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::ResolveShipping => "resolve_shipping",
            Self::CreateOrder => "create_order",
            Self::CreateOrderItems => "create_order_items",
            Self::RetireCart => "retire_cart",
            Self::ClearCartItems => "clear_cart_items",
            Self::ProvisionNextCart => "provision_next_cart",
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A store failure tagged with the checkout step that produced it.
#[derive(Debug, thiserror::Error)]
#[error("checkout failed at {step}: {source}")]
pub struct CheckoutError {
    pub step: CheckoutStep,
    #[source]
    pub source: StoreError,
}

/// Shipping details collected from the buyer.
#[derive(Debug, Clone)]
pub struct ShippingDetails {
    pub recipient_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub province: String,
}

/// One order line as captured at checkout time.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReceiptLine {
    pub title: String,
    pub qty: i64,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// The completed checkout, with everything the hand-off message needs.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub grand_total: Decimal,
    pub recipient_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub province: String,
}

/// Outcome of a checkout attempt.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// The cart had no lines; nothing was written.
    EmptyCart,
    Completed(Box<CheckoutReceipt>),
}

/// Human-facing order number: date plus the trailing digits of the clock.
#[must_use]
pub fn order_number(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().unsigned_abs().to_string();
    let tail = &millis[millis.len().saturating_sub(6)..];
    format!("ORD-{}-{tail}", now.format("%Y%m%d"))
}

/// Run the full checkout sequence for `user_id`.
///
/// An empty cart returns [`CheckoutOutcome::EmptyCart`] before any write.
/// Otherwise: resolve shipping, insert the order and its lines, retire the
/// cart as converted, clear its lines, and provision a fresh active cart.
///
/// # Errors
///
/// Returns [`CheckoutError`] naming the step that failed.
pub async fn checkout<S: CommerceStore>(
    store: &S,
    user_id: UserId,
    details: &ShippingDetails,
    number: String,
) -> Result<CheckoutOutcome, CheckoutError> {
    let snapshot = cart::cart_snapshot(store, user_id)
        .await
        .map_err(at(CheckoutStep::Snapshot))?;
    if snapshot.items.is_empty() {
        warn!(%user_id, "checkout attempted with empty cart");
        return Ok(CheckoutOutcome::EmptyCart);
    }

    let shipping_cost = shipping::cost(store, &details.province, &details.city)
        .await
        .map_err(at(CheckoutStep::ResolveShipping))?;

    let subtotal = snapshot.total_amount;
    let grand_total = subtotal + shipping_cost;

    let order = store
        .insert_order(&NewOrder {
            user_id,
            status: OrderStatus::Pending,
            order_number: Some(number),
            subtotal_amount: subtotal,
            shipping_cost,
            total_amount: grand_total,
            shipping_province: Some(details.province.clone()),
            shipping_city: Some(details.city.clone()),
            shipping_address: Some(format_address(details)),
        })
        .await
        .map_err(at(CheckoutStep::CreateOrder))?;

    let items: Vec<NewOrderItem> = snapshot
        .items
        .iter()
        .map(|line| NewOrderItem {
            order_id: order.id,
            product_id: line.product.id,
            qty: line.qty,
            unit_price: line.unit_price,
        })
        .collect();
    store
        .insert_order_items(&items)
        .await
        .map_err(at(CheckoutStep::CreateOrderItems))?;

    store
        .set_cart_status(snapshot.cart.id, CartStatus::Converted)
        .await
        .map_err(at(CheckoutStep::RetireCart))?;
    store
        .clear_cart_lines(snapshot.cart.id)
        .await
        .map_err(at(CheckoutStep::ClearCartItems))?;
    cart::ensure_active_cart(store, user_id)
        .await
        .map_err(at(CheckoutStep::ProvisionNextCart))?;

    info!(%user_id, order_id = %order.id, %grand_total, "checkout completed");

    let lines = snapshot
        .items
        .iter()
        .map(|line| ReceiptLine {
            title: line.product.title.clone(),
            qty: line.qty,
            unit_price: line.unit_price,
            subtotal: line.subtotal(),
        })
        .collect();

    Ok(CheckoutOutcome::Completed(Box::new(CheckoutReceipt {
        order,
        lines,
        subtotal,
        shipping_cost,
        grand_total,
        recipient_name: details.recipient_name.clone(),
        phone: details.phone.clone(),
        street: details.street.clone(),
        city: details.city.clone(),
        province: details.province.clone(),
    })))
}

/// Single-line shipping address: non-empty parts joined with " | ".
fn format_address(details: &ShippingDetails) -> String {
    [
        details.recipient_name.as_str(),
        details.phone.as_str(),
        details.street.as_str(),
        details.city.as_str(),
        details.province.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" | ")
}

fn at(step: CheckoutStep) -> impl FnOnce(StoreError) -> CheckoutError {
    move |source| CheckoutError { step, source }
}
