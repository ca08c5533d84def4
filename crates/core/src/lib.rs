//! Arc Audio Core - Shared types library.
//!
//! This crate provides common types used across all Arc Audio components:
//! - `storefront` - Public-facing catalog, cart, and checkout API
//! - `admin` - Internal administration panel
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! The [`store::CommerceStore`] trait describes the hosted relational store
//! at a typed level; the `arc-audio-supabase` crate implements it against
//! the real backend, and the integration-tests crate implements it in memory.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, statuses, prices, emails
//! - [`records`] - Typed domain records mapped from remote rows
//! - [`store`] - The remote store contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod records;
pub mod store;
pub mod types;

pub use records::*;
pub use store::{CommerceStore, StoreError};
pub use types::*;
