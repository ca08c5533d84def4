//! Shipping rate resolution tests against the in-memory store.

use rust_decimal::Decimal;

use arc_audio_integration_tests::MemoryStore;
use arc_audio_storefront::services::shipping::{cities, cost, provinces};

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.seed_rate("Jawa Barat", "Bandung", 20_000, true);
    store.seed_rate("Jawa Barat", "Bogor", 18_000, true);
    store.seed_rate("DKI Jakarta", "Jakarta Selatan", 15_000, true);
    store.seed_rate("Bali", "Denpasar", 35_000, false);
    store
}

#[tokio::test]
async fn test_provinces_are_distinct_and_sorted() {
    let store = seeded_store();
    let out = provinces(&store).await.unwrap();
    // Inactive routes do not contribute a province.
    assert_eq!(out, vec!["DKI Jakarta", "Jawa Barat"]);
}

#[tokio::test]
async fn test_cities_scoped_to_province() {
    let store = seeded_store();
    let out = cities(&store, "Jawa Barat").await.unwrap();
    assert_eq!(out, vec!["Bandung", "Bogor"]);
}

#[tokio::test]
async fn test_blank_province_yields_no_cities() {
    let store = seeded_store();
    let out = cities(&store, "   ").await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_cost_for_known_route() {
    let store = seeded_store();
    let out = cost(&store, "Jawa Barat", "Bandung").await.unwrap();
    assert_eq!(out, Decimal::from(20_000));
}

#[tokio::test]
async fn test_unmatched_route_costs_zero() {
    let store = seeded_store();
    let out = cost(&store, "Jawa Timur", "Surabaya").await.unwrap();
    assert_eq!(out, Decimal::ZERO);
}

#[tokio::test]
async fn test_inactive_route_costs_zero() {
    let store = seeded_store();
    let out = cost(&store, "Bali", "Denpasar").await.unwrap();
    assert_eq!(out, Decimal::ZERO);
}

#[tokio::test]
async fn test_blank_inputs_cost_zero() {
    let store = seeded_store();
    assert_eq!(cost(&store, "", "Bandung").await.unwrap(), Decimal::ZERO);
    assert_eq!(cost(&store, "Jawa Barat", "").await.unwrap(), Decimal::ZERO);
}
