//! Cart service tests against the in-memory store.

use rust_decimal::Decimal;

use arc_audio_core::{CommerceStore, UserId};
use arc_audio_integration_tests::{MemoryStore, test_product};
use arc_audio_storefront::services::cart::{
    CartError, add_to_cart, cart_snapshot, ensure_active_cart, remove_cart_item,
};

#[tokio::test]
async fn test_ensure_active_cart_is_idempotent() {
    let store = MemoryStore::new();
    let user = UserId::generate();

    let first = ensure_active_cart(&store, user).await.unwrap();
    let second = ensure_active_cart(&store, user).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(store.carts().len(), 1);
}

#[tokio::test]
async fn test_each_user_gets_their_own_cart() {
    let store = MemoryStore::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let a = ensure_active_cart(&store, alice).await.unwrap();
    let b = ensure_active_cart(&store, bob).await.unwrap();

    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_re_adding_aggregates_quantity() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let product = store.seed_product(test_product("arc-pulse", "Arc Pulse", Some(125_000)));

    add_to_cart(&store, user, product, 2).await.unwrap();
    let snapshot = add_to_cart(&store, user, product, 3).await.unwrap();

    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].qty, 5);
    assert_eq!(snapshot.total_qty, 5);
    assert_eq!(snapshot.total_amount, Decimal::from(625_000));
}

#[tokio::test]
async fn test_re_adding_refreshes_unit_price() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let product_id = store.seed_product(test_product("arc-pulse", "Arc Pulse", Some(100_000)));

    add_to_cart(&store, user, product_id, 1).await.unwrap();

    // Price change between add-events reprices the whole line.
    let patch = arc_audio_core::ProductPatch {
        id: Some(product_id),
        title: "Arc Pulse".to_string(),
        slug: "arc-pulse".to_string(),
        subtitle: None,
        badge: None,
        price: Some(Decimal::from(150_000)),
        track_stock: false,
        stock_qty: 0,
        is_active: None,
    };
    store.upsert_product(&patch).await.unwrap();

    let snapshot = add_to_cart(&store, user, product_id, 1).await.unwrap();
    assert_eq!(snapshot.items[0].qty, 2);
    assert_eq!(snapshot.items[0].unit_price, Decimal::from(150_000));
    assert_eq!(snapshot.total_amount, Decimal::from(300_000));
}

#[tokio::test]
async fn test_quantity_below_one_is_clamped() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let product = store.seed_product(test_product("arc-mini", "Arc Mini", Some(99_000)));

    let snapshot = add_to_cart(&store, user, product, 0).await.unwrap();
    assert_eq!(snapshot.items[0].qty, 1);

    let snapshot = add_to_cart(&store, user, product, -5).await.unwrap();
    assert_eq!(snapshot.items[0].qty, 2);
}

#[tokio::test]
async fn test_tracked_product_with_no_stock_is_rejected() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let mut product = test_product("arc-max", "Arc Max", Some(500_000));
    product.track_stock = true;
    product.stock_qty = Some(0);
    let product_id = store.seed_product(product);

    let err = add_to_cart(&store, user, product_id, 1).await.unwrap_err();
    assert!(matches!(err, CartError::OutOfStock));
    assert_eq!(store.line_count(), 0);
}

#[tokio::test]
async fn test_insufficient_stock_leaves_cart_unchanged() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let mut product = test_product("arc-max", "Arc Max", Some(500_000));
    product.track_stock = true;
    product.stock_qty = Some(4);
    let product_id = store.seed_product(product);

    add_to_cart(&store, user, product_id, 3).await.unwrap();

    let err = add_to_cart(&store, user, product_id, 2).await.unwrap_err();
    match err {
        CartError::InsufficientStock { remaining } => assert_eq!(remaining, 4),
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    // The existing line is untouched.
    let snapshot = cart_snapshot(&store, user).await.unwrap();
    assert_eq!(snapshot.items[0].qty, 3);
}

#[tokio::test]
async fn test_untracked_product_ignores_stock() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let mut product = test_product("arc-lite", "Arc Lite", Some(75_000));
    product.track_stock = false;
    product.stock_qty = Some(0);
    let product_id = store.seed_product(product);

    let snapshot = add_to_cart(&store, user, product_id, 10).await.unwrap();
    assert_eq!(snapshot.items[0].qty, 10);
}

#[tokio::test]
async fn test_unpriced_product_adds_at_zero() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let product = store.seed_product(test_product("arc-promo", "Arc Promo", None));

    let snapshot = add_to_cart(&store, user, product, 2).await.unwrap();
    assert_eq!(snapshot.items[0].unit_price, Decimal::ZERO);
    assert_eq!(snapshot.total_amount, Decimal::ZERO);
}

#[tokio::test]
async fn test_remove_cart_item() {
    let store = MemoryStore::new();
    let user = UserId::generate();
    let product = store.seed_product(test_product("arc-pulse", "Arc Pulse", Some(125_000)));

    let snapshot = add_to_cart(&store, user, product, 1).await.unwrap();
    let item_id = snapshot.items[0].id;

    let snapshot = remove_cart_item(&store, user, item_id).await.unwrap();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total_qty, 0);
    assert_eq!(snapshot.total_amount, Decimal::ZERO);
}
