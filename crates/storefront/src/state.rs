//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::{FlowStore, Kitchen};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// menu, the kitchen and every session's order flow.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    kitchen: Kitchen,
    flows: FlowStore,
}

impl AppState {
    /// Create application state with the simulated kitchen.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let kitchen = Kitchen::simulated(&config.kitchen);
        Self::with_kitchen(config, Catalog::heights_and_bites(), kitchen)
    }

    /// Create application state around an explicit catalog and kitchen.
    #[must_use]
    pub fn with_kitchen(config: StorefrontConfig, catalog: Catalog, kitchen: Kitchen) -> Self {
        let flows = FlowStore::new(config.session_idle);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                kitchen,
                flows,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the order submitter.
    #[must_use]
    pub fn kitchen(&self) -> &Kitchen {
        &self.inner.kitchen
    }

    /// Get a reference to the per-session order flows.
    #[must_use]
    pub fn flows(&self) -> &FlowStore {
        &self.inner.flows
    }
}
