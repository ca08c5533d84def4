//! End-to-end checkout tests against the in-memory store.

use rust_decimal::Decimal;

use arc_audio_core::{CartStatus, OrderStatus, UserId};
use arc_audio_integration_tests::{MemoryStore, test_product};
use arc_audio_storefront::services::cart::{add_to_cart, cart_snapshot};
use arc_audio_storefront::services::checkout::{CheckoutOutcome, ShippingDetails, checkout};

fn details() -> ShippingDetails {
    ShippingDetails {
        recipient_name: "Budi".to_string(),
        phone: "081234567890".to_string(),
        street: "Jl. Merdeka 1".to_string(),
        city: "Bandung".to_string(),
        province: "Jawa Barat".to_string(),
    }
}

#[tokio::test]
async fn test_empty_cart_checkout_writes_nothing() {
    let store = MemoryStore::new();
    let user = UserId::generate();

    let outcome = checkout(&store, user, &details(), "ORD-20250314-000001".to_string())
        .await
        .unwrap();

    assert!(matches!(outcome, CheckoutOutcome::EmptyCart));
    assert!(store.orders().is_empty());
    assert!(store.order_items().is_empty());
    // Only the lazily created cart exists, still active.
    let carts = store.carts();
    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0].status, CartStatus::Active);
}

#[tokio::test]
async fn test_full_checkout_flow() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let product = store.seed_product(test_product("arc-pulse", "Arc Pulse", Some(125_000)));
    store.seed_rate("Jawa Barat", "Bandung", 20_000, true);

    add_to_cart(&store, user, product, 2).await.unwrap();
    let original_cart = cart_snapshot(&store, user).await.unwrap().cart;

    let outcome = checkout(&store, user, &details(), "ORD-20250314-123456".to_string())
        .await
        .unwrap();
    let receipt = match outcome {
        CheckoutOutcome::Completed(receipt) => receipt,
        CheckoutOutcome::EmptyCart => panic!("cart was not empty"),
    };

    // Totals.
    assert_eq!(receipt.subtotal, Decimal::from(250_000));
    assert_eq!(receipt.shipping_cost, Decimal::from(20_000));
    assert_eq!(receipt.grand_total, Decimal::from(270_000));

    // Order row.
    let orders = store.orders();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.order_number.as_deref(), Some("ORD-20250314-123456"));
    assert_eq!(order.total_amount, Decimal::from(270_000));
    assert_eq!(order.shipping_province.as_deref(), Some("Jawa Barat"));
    assert_eq!(
        order.shipping_address.as_deref(),
        Some("Budi | 081234567890 | Jl. Merdeka 1 | Bandung | Jawa Barat")
    );

    // Line snapshot.
    let items = store.order_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].qty, 2);
    assert_eq!(items[0].unit_price, Decimal::from(125_000));

    // Old cart converted and emptied; a fresh active cart exists.
    let carts = store.carts();
    assert_eq!(carts.len(), 2);
    let old = carts.iter().find(|c| c.id == original_cart.id).unwrap();
    assert_eq!(old.status, CartStatus::Converted);
    assert_eq!(store.line_count(), 0);

    let fresh = cart_snapshot(&store, user).await.unwrap();
    assert_ne!(fresh.cart.id, original_cart.id);
    assert!(fresh.items.is_empty());
}

#[tokio::test]
async fn test_multi_line_checkout_snapshots_every_line() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let pulse = store.seed_product(test_product("arc-pulse", "Arc Pulse", Some(100_000)));
    let mini = store.seed_product(test_product("arc-mini", "Arc Mini", Some(50_000)));
    store.seed_rate("Jawa Barat", "Bandung", 20_000, true);

    add_to_cart(&store, user, pulse, 2).await.unwrap();
    add_to_cart(&store, user, mini, 1).await.unwrap();

    let outcome = checkout(&store, user, &details(), "ORD-20250314-654321".to_string())
        .await
        .unwrap();
    let receipt = match outcome {
        CheckoutOutcome::Completed(receipt) => receipt,
        CheckoutOutcome::EmptyCart => panic!("cart was not empty"),
    };

    assert_eq!(receipt.subtotal, Decimal::from(250_000));
    assert_eq!(receipt.grand_total, Decimal::from(270_000));
    assert_eq!(receipt.lines.len(), 2);
    assert_eq!(store.order_items().len(), 2);
    assert_eq!(store.line_count(), 0);
}

#[tokio::test]
async fn test_checkout_without_matching_rate_ships_free() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let product = store.seed_product(test_product("arc-mini", "Arc Mini", Some(99_000)));

    add_to_cart(&store, user, product, 1).await.unwrap();

    let outcome = checkout(&store, user, &details(), "ORD-20250314-000002".to_string())
        .await
        .unwrap();
    let receipt = match outcome {
        CheckoutOutcome::Completed(receipt) => receipt,
        CheckoutOutcome::EmptyCart => panic!("cart was not empty"),
    };

    assert_eq!(receipt.shipping_cost, Decimal::ZERO);
    assert_eq!(receipt.grand_total, Decimal::from(99_000));
}

#[tokio::test]
async fn test_checkout_preserves_captured_prices() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let product = store.seed_product(test_product("arc-max", "Arc Max", Some(500_000)));

    add_to_cart(&store, user, product, 1).await.unwrap();

    // A later price change must not affect the already-captured line.
    let patch = arc_audio_core::ProductPatch {
        id: Some(product),
        title: "Arc Max".to_string(),
        slug: "arc-max".to_string(),
        subtitle: None,
        badge: None,
        price: Some(Decimal::from(999_000)),
        track_stock: false,
        stock_qty: 0,
        is_active: None,
    };
    use arc_audio_core::CommerceStore;
    store.upsert_product(&patch).await.unwrap();

    let outcome = checkout(&store, user, &details(), "ORD-20250314-000003".to_string())
        .await
        .unwrap();
    let receipt = match outcome {
        CheckoutOutcome::Completed(receipt) => receipt,
        CheckoutOutcome::EmptyCart => panic!("cart was not empty"),
    };

    assert_eq!(receipt.subtotal, Decimal::from(500_000));
    assert_eq!(store.order_items()[0].unit_price, Decimal::from(500_000));
}
