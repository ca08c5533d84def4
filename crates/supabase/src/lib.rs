//! Hosted data store and auth clients.
//!
//! # Architecture
//!
//! - The hosted backend is the source of truth - NO local sync, direct API
//!   calls over its REST surface
//! - [`PostgrestClient`] is the thin table-scoped accessor: query builder
//!   with filter/order/limit predicates, insert/update/upsert/delete
//! - [`AuthClient`] wraps the auth subsystem: sign up, sign in, sign out,
//!   user retrieval, with 429 rate-limit detection
//! - [`SupabaseStore`] implements [`arc_audio_core::CommerceStore`], mapping
//!   loosely-typed rows into typed records at the boundary
//!
//! # Example
//!
//! ```rust,ignore
//! use arc_audio_supabase::{SupabaseConfig, SupabaseStore};
//! use arc_audio_core::CommerceStore;
//!
//! let store = SupabaseStore::new(&config);
//!
//! let products = store.active_products().await?;
//! let cart = store.find_active_cart(user_id).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod auth;
mod config;
mod error;
mod postgrest;
mod store;

pub use auth::{AuthClient, AuthSession, AuthUser, SignUp};
pub use config::SupabaseConfig;
pub use error::SupabaseError;
pub use postgrest::PostgrestClient;
pub use store::SupabaseStore;
