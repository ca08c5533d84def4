//! Storefront domain services.
//!
//! Free functions generic over the store trait so the same logic runs
//! against the hosted backend in production and an in-memory fake in tests.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod compare;
pub mod shipping;
