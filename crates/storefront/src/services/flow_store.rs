//! Per-session order flows.
//!
//! Each browser session owns one [`OrderFlow`], keyed by a UUID kept in the
//! session cookie. Flows live in memory and are evicted only after sitting
//! idle for as long as the session record that points at them.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::order_flow::OrderFlow;

/// Shared handle to one session's flow.
pub type SharedFlow = Arc<Mutex<OrderFlow>>;

/// In-memory map from session key to order flow.
///
/// A flow is the only copy of its cart, so the store has no capacity bound:
/// entries leave through idle expiry alone.
#[derive(Clone)]
pub struct FlowStore {
    flows: Cache<Uuid, SharedFlow>,
}

impl FlowStore {
    /// Create a store that drops a flow after `idle` without access.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let flows = Cache::builder().time_to_idle(idle).build();
        Self { flows }
    }

    /// The flow for `key`, starting a fresh one if none exists.
    pub async fn get_or_create(&self, key: Uuid) -> SharedFlow {
        self.flows
            .get_with(key, async move {
                debug!(session = %key, "Starting order flow");
                Arc::new(Mutex::new(OrderFlow::new()))
            })
            .await
    }
}

impl std::fmt::Debug for FlowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowStore")
            .field("sessions", &self.flows.entry_count())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heights_bites_core::OrderPhase;

    use super::*;
    use crate::catalog::Catalog;

    #[tokio::test]
    async fn test_same_key_shares_flow() {
        let store = FlowStore::new(Duration::from_secs(60));
        let key = Uuid::new_v4();
        let catalog = Catalog::heights_and_bites();

        {
            let flow = store.get_or_create(key).await;
            flow.lock().await.add_item(&catalog.items()[0]).unwrap();
        }

        let flow = store.get_or_create(key).await;
        assert_eq!(flow.lock().await.cart().len(), 1);

        let other = store.get_or_create(Uuid::new_v4()).await;
        assert!(other.lock().await.cart().is_empty());
    }

    #[tokio::test]
    async fn test_new_session_survives_a_busy_store() {
        let store = FlowStore::new(Duration::from_secs(60));
        let busy: Vec<Uuid> = (0..12_000).map(|_| Uuid::new_v4()).collect();
        for _ in 0..3 {
            for key in &busy {
                store.get_or_create(*key).await;
            }
        }
        store.flows.run_pending_tasks().await;

        let catalog = Catalog::heights_and_bites();
        let newcomer = Uuid::new_v4();
        store
            .get_or_create(newcomer)
            .await
            .lock()
            .await
            .add_item(&catalog.items()[0])
            .unwrap();
        store.flows.run_pending_tasks().await;

        let flow = store.get_or_create(newcomer).await;
        assert_eq!(flow.lock().await.cart().len(), 1);
        assert_eq!(store.flows.entry_count(), 12_001);
    }

    #[tokio::test]
    async fn test_idle_flow_is_replaced() {
        let store = FlowStore::new(Duration::from_millis(50));
        let key = Uuid::new_v4();
        let catalog = Catalog::heights_and_bites();

        store
            .get_or_create(key)
            .await
            .lock()
            .await
            .add_item(&catalog.items()[0])
            .unwrap();

        // The cache keeps its own clock, so this has to be a real wait.
        tokio::time::sleep(Duration::from_millis(200)).await;

        let fresh = store.get_or_create(key).await;
        let fresh = fresh.lock().await;
        assert_eq!(fresh.phase(), OrderPhase::Select);
        assert!(fresh.cart().is_empty());
    }
}
