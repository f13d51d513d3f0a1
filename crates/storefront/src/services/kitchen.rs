//! Order submission.
//!
//! The kitchen is where a placed order goes. [`OrderSubmitter`] is the seam:
//! the shipped [`SimulatedKitchen`] waits a fixed latency and accepts every
//! order, while a real integration would make a network call and may fail.
//! [`Kitchen`] wraps any submitter with a per-attempt timeout and a bounded
//! retry policy for transient failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use heights_bites_core::{OrderDraft, OrderReceipt};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::KitchenConfig;

/// Errors returned by an order submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The kitchen could not be reached; worth retrying.
    #[error("kitchen unavailable: {0}")]
    Unavailable(String),

    /// The kitchen refused the order; retrying will not help.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The attempt did not finish in time; worth retrying.
    #[error("submission timed out after {0:?}")]
    TimedOut(Duration),
}

impl SubmitError {
    /// Whether another attempt might succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::TimedOut(_))
    }
}

/// Something that accepts orders.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit an order, returning the kitchen's receipt.
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderReceipt, SubmitError>;
}

/// Accepts every order after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedKitchen {
    latency: Duration,
}

impl SimulatedKitchen {
    /// Create a simulated kitchen with the given latency.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedKitchen {
    fn default() -> Self {
        Self::new(KitchenConfig::default().latency)
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedKitchen {
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderReceipt, SubmitError> {
        tokio::time::sleep(self.latency).await;
        Ok(OrderReceipt::issue(draft, Utc::now()))
    }
}

/// A submitter plus the timeout/retry policy applied to it.
#[derive(Clone)]
pub struct Kitchen {
    submitter: Arc<dyn OrderSubmitter>,
    timeout: Duration,
    max_attempts: u32,
    backoff: Duration,
}

impl std::fmt::Debug for Kitchen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kitchen")
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

impl Kitchen {
    /// Wrap `submitter` with the policy from `config`.
    ///
    /// `config.latency` is not used here; it only configures
    /// [`SimulatedKitchen`].
    #[must_use]
    pub fn new(submitter: Arc<dyn OrderSubmitter>, config: &KitchenConfig) -> Self {
        Self {
            submitter,
            timeout: config.timeout,
            max_attempts: config.max_attempts.max(1),
            backoff: config.backoff,
        }
    }

    /// The simulated kitchen configured from `config`.
    #[must_use]
    pub fn simulated(config: &KitchenConfig) -> Self {
        Self::new(Arc::new(SimulatedKitchen::new(config.latency)), config)
    }

    /// Submit `draft`, retrying transient failures.
    ///
    /// Each attempt is bounded by the configured timeout. After a transient
    /// failure, attempt `n` waits `n × backoff` before the next one. A
    /// permanent failure, or running out of attempts, returns the last error.
    ///
    /// # Errors
    ///
    /// Returns the final [`SubmitError`] if no attempt succeeded.
    #[instrument(skip(self, draft), fields(items = draft.item_count(), total = %draft.total))]
    pub async fn submit(&self, draft: &OrderDraft) -> Result<OrderReceipt, SubmitError> {
        let mut attempt = 1;
        loop {
            let outcome = tokio::time::timeout(self.timeout, self.submitter.submit(draft))
                .await
                .unwrap_or(Err(SubmitError::TimedOut(self.timeout)));

            match outcome {
                Ok(receipt) => {
                    info!(order = %receipt.number, attempt, "Order accepted by kitchen");
                    return Ok(receipt);
                }
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(error = %err, attempt, "Order submission failed, retrying");
                    tokio::time::sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(error = %err, attempt, "Order submission gave up");
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use heights_bites_core::{Cart, MenuCategory, MenuItem, MenuItemId, Price};

    use super::*;

    /// Replays a scripted sequence of outcomes, then succeeds.
    pub(crate) struct ScriptedKitchen {
        script: Mutex<VecDeque<Result<(), SubmitError>>>,
        pub(crate) calls: AtomicU32,
    }

    impl ScriptedKitchen {
        pub(crate) fn new(script: Vec<Result<(), SubmitError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl OrderSubmitter for ScriptedKitchen {
        async fn submit(&self, draft: &OrderDraft) -> Result<OrderReceipt, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front().unwrap_or(Ok(()));
            next.map(|()| OrderReceipt::issue(draft, Utc::now()))
        }
    }

    fn draft() -> OrderDraft {
        let mut cart = Cart::new();
        cart.add(&MenuItem::new(
            MenuItemId::new(8),
            "Chocolate Cake",
            "Rich chocolate cake with a molten center",
            Price::usd_cents(799),
            MenuCategory::Desserts,
        ));
        OrderDraft::from_cart(&cart, "123 Main St", "", false)
    }

    fn config(max_attempts: u32) -> KitchenConfig {
        KitchenConfig {
            latency: Duration::from_millis(1500),
            timeout: Duration::from_secs(10),
            max_attempts,
            backoff: Duration::from_millis(250),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_kitchen_waits_latency() {
        let kitchen = Kitchen::simulated(&config(1));
        let started = tokio::time::Instant::now();

        let receipt = kitchen.submit(&draft()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(receipt.total.display(), "$7.99");
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_is_retried() {
        let scripted = Arc::new(ScriptedKitchen::new(vec![Err(SubmitError::Unavailable(
            "connection reset".to_string(),
        ))]));
        let kitchen = Kitchen::new(scripted.clone(), &config(3));

        assert!(kitchen.submit(&draft()).await.is_ok());
        assert_eq!(scripted.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_is_not_retried() {
        let scripted = Arc::new(ScriptedKitchen::new(vec![Err(SubmitError::Rejected(
            "kitchen closed".to_string(),
        ))]));
        let kitchen = Kitchen::new(scripted.clone(), &config(3));

        let err = kitchen.submit(&draft()).await.unwrap_err();
        assert_eq!(err, SubmitError::Rejected("kitchen closed".to_string()));
        assert_eq!(scripted.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let unavailable = || Err(SubmitError::Unavailable("down".to_string()));
        let scripted = Arc::new(ScriptedKitchen::new(vec![
            unavailable(),
            unavailable(),
            unavailable(),
        ]));
        let kitchen = Kitchen::new(scripted.clone(), &config(2));

        assert!(kitchen.submit(&draft()).await.is_err());
        assert_eq!(scripted.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_kitchen_times_out() {
        let slow = Arc::new(SimulatedKitchen::new(Duration::from_secs(60)));
        let kitchen = Kitchen::new(slow, &config(1));

        let err = kitchen.submit(&draft()).await.unwrap_err();
        assert_eq!(err, SubmitError::TimedOut(Duration::from_secs(10)));
        assert!(err.is_transient());
    }
}
