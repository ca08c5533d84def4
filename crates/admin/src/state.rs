//! Application state shared across handlers.

use std::sync::Arc;

use arc_audio_supabase::{AuthClient, SupabaseStore};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: SupabaseStore,
    auth: AuthClient,
}

impl AppState {
    /// Create a new application state from loaded configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let store = SupabaseStore::new(&config.supabase);
        let auth = AuthClient::new(&config.supabase);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                auth,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
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
}
