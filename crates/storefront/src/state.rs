//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use arc_audio_core::{CommerceStore, Product, StoreError};
use arc_audio_supabase::{AuthClient, SupabaseStore};

use crate::config::StorefrontConfig;

/// How long a fetched product list stays fresh.
const CATALOG_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache key for the active product list; the cache has a single entry.
const CATALOG_KEY: &str = "active_products";

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: SupabaseStore,
    auth: AuthClient,
    catalog: Cache<&'static str, Arc<Vec<Product>>>,
}

impl AppState {
    /// Create a new application state from loaded configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = SupabaseStore::new(&config.supabase);
        let auth = AuthClient::new(&config.supabase);
        let catalog = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATALOG_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                auth,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the hosted store client.
    #[must_use]
    pub fn store(&self) -> &SupabaseStore {
        &self.inner.store
    }

    /// Get a reference to the auth client.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.inner.auth
    }

    /// Active products, served from the in-process cache when fresh.
    ///
    /// Fetch failures are not cached; the next request retries.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the cache is cold and the fetch fails.
    pub async fn catalog(&self) -> Result<Arc<Vec<Product>>, StoreError> {
        if let Some(products) = self.inner.catalog.get(CATALOG_KEY).await {
            return Ok(products);
        }
        let products = Arc::new(self.inner.store.active_products().await?);
        self.inner
            .catalog
            .insert(CATALOG_KEY, Arc::clone(&products))
            .await;
        Ok(products)
    }

    /// Drop the cached product list; the next request re-fetches.
    pub async fn invalidate_catalog(&self) {
        self.inner.catalog.invalidate(CATALOG_KEY).await;
    }
}
