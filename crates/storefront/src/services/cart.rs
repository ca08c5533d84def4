//! Cart management.
//!
//! One cart per user is `active` at a time; it is created lazily on first
//! access. `ensure_active_cart` is idempotent for sequential calls, but two
//! truly concurrent calls can both observe "no active cart" and both insert
//! one - the store has no compare-and-swap, and this window is an accepted
//! limitation.

use rust_decimal::Decimal;
use tracing::debug;

use arc_audio_core::{
    Cart, CartItemId, CartSnapshot, CommerceStore, ProductId, StoreError, UserId,
};

/// Errors from cart mutations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Tracked product with nothing left in stock.
    #[error("out of stock")]
    OutOfStock,

    /// Requested quantity would exceed tracked stock. The message reports
    /// what is actually left.
    #[error("insufficient stock, only {remaining} left")]
    InsufficientStock {
        /// Remaining tracked stock for the product.
        remaining: i64,
    },

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Return the user's active cart, creating one if none exists.
///
/// # Errors
///
/// Returns [`StoreError`] when the store fails.
pub async fn ensure_active_cart<S: CommerceStore>(
    store: &S,
    user_id: UserId,
) -> Result<Cart, StoreError> {
    if let Some(existing) = store.find_active_cart(user_id).await? {
        return Ok(existing);
    }
    debug!(%user_id, "creating active cart");
    store.insert_cart(user_id).await
}

/// The active cart with its line items and aggregated totals.
///
/// # Errors
///
/// Returns [`StoreError`] when the store fails.
pub async fn cart_snapshot<S: CommerceStore>(
    store: &S,
    user_id: UserId,
) -> Result<CartSnapshot, StoreError> {
    let cart = ensure_active_cart(store, user_id).await?;
    let items = store.cart_lines(cart.id).await?;

    let total_qty = items.iter().map(|it| it.qty.max(0)).sum();
    let total_amount = items.iter().map(CartLineExt::line_amount).sum();

    Ok(CartSnapshot {
        cart,
        items,
        total_qty,
        total_amount,
    })
}

/// Add a product to the user's active cart.
///
/// The product record is re-fetched for its live price and stock fields.
/// Re-adding a product increments the existing line's quantity and refreshes
/// its captured unit price to the current product price, so price changes
/// between add-events retroactively reprice the whole line. That matches the
/// storefront's historical behavior and is kept on purpose.
///
/// # Errors
///
/// - [`CartError::OutOfStock`] for a tracked product with no stock
/// - [`CartError::InsufficientStock`] when in-cart + requested exceeds stock
/// - [`CartError::Store`] when the store fails
pub async fn add_to_cart<S: CommerceStore>(
    store: &S,
    user_id: UserId,
    product_id: ProductId,
    qty: i64,
) -> Result<CartSnapshot, CartError> {
    let cart = ensure_active_cart(store, user_id).await?;
    let existing = store.find_cart_line(cart.id, product_id).await?;
    let product = store.product(product_id).await?;

    let unit_price = product.price.unwrap_or(Decimal::ZERO);
    let requested_qty = qty.max(1);
    let existing_qty = existing.map_or(0, |(_, q)| q.max(0));

    if product.track_stock {
        let stock_qty = product.effective_stock();
        if stock_qty <= 0 {
            return Err(CartError::OutOfStock);
        }
        if existing_qty + requested_qty > stock_qty {
            return Err(CartError::InsufficientStock {
                remaining: stock_qty,
            });
        }
    }

    match existing {
        Some((item_id, current_qty)) => {
            store
                .update_cart_line(item_id, current_qty.max(0) + requested_qty, unit_price)
                .await?;
        }
        None => {
            store
                .insert_cart_line(cart.id, product_id, requested_qty, unit_price)
                .await?;
        }
    }

    Ok(cart_snapshot(store, user_id).await?)
}

/// Delete one line item and return the refreshed snapshot.
///
/// # Errors
///
/// Returns [`StoreError`] when the store fails.
pub async fn remove_cart_item<S: CommerceStore>(
    store: &S,
    user_id: UserId,
    item_id: CartItemId,
) -> Result<CartSnapshot, StoreError> {
    ensure_active_cart(store, user_id).await?;
    store.delete_cart_line(item_id).await?;
    cart_snapshot(store, user_id).await
}

trait CartLineExt {
    fn line_amount(&self) -> Decimal;
}

impl CartLineExt for arc_audio_core::CartLine {
    fn line_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.qty.max(0))
    }
}
