//! Session records kept in a moka cache.
//!
//! Every record is evicted at its own expiry date, so sessions that are
//! never seen again are freed without a sweeper task.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tower_sessions::SessionStore;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;

/// In-memory session store with per-record expiry.
#[derive(Clone)]
pub struct IdleSessionStore {
    records: Cache<Id, Record>,
}

impl IdleSessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        let records = Cache::builder().expire_after(UntilExpiryDate).build();
        Self { records }
    }
}

impl Default for IdleSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdleSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdleSessionStore")
            .field("sessions", &self.records.entry_count())
            .finish()
    }
}

#[async_trait]
impl SessionStore for IdleSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.records.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .records
            .get(session_id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.invalidate(session_id).await;
        Ok(())
    }
}

/// Expires a record when its `expiry_date` passes; saving moves the date.
struct UntilExpiryDate;

impl Expiry<Id, Record> for UntilExpiryDate {
    fn expire_after_create(
        &self,
        _id: &Id,
        record: &Record,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(time_left(record))
    }

    fn expire_after_update(
        &self,
        _id: &Id,
        record: &Record,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(time_left(record))
    }
}

fn time_left(record: &Record) -> Duration {
    Duration::try_from(record.expiry_date - OffsetDateTime::now_utc()).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::cookie::time::Duration as CookieDuration;

    use super::*;

    fn record(expires_in: CookieDuration) -> Record {
        Record {
            id: Id::default(),
            data: std::collections::HashMap::default(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_create_and_load() {
        let store = IdleSessionStore::new();
        let mut live = record(CookieDuration::minutes(30));
        store.create(&mut live).await.unwrap();

        assert_eq!(store.load(&live.id).await.unwrap(), Some(live.clone()));

        store.delete(&live.id).await.unwrap();
        assert_eq!(store.load(&live.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_records_are_freed() {
        let store = IdleSessionStore::new();
        for _ in 0..3 {
            let mut stale = record(CookieDuration::days(-1));
            store.create(&mut stale).await.unwrap();
            assert_eq!(store.load(&stale.id).await.unwrap(), None);
        }
        let mut live = record(CookieDuration::minutes(30));
        store.create(&mut live).await.unwrap();

        store.records.run_pending_tasks().await;

        assert_eq!(store.records.entry_count(), 1);
        assert!(store.load(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_extends_expiry() {
        let store = IdleSessionStore::new();
        let mut session = record(CookieDuration::milliseconds(100));
        store.create(&mut session).await.unwrap();

        session.expiry_date = OffsetDateTime::now_utc() + CookieDuration::minutes(30);
        store.save(&session).await.unwrap();
        // The cache keeps its own clock, so this has to be a real wait.
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(store.load(&session.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_avoids_id_collision() {
        let store = IdleSessionStore::new();
        let mut first = record(CookieDuration::minutes(30));
        store.create(&mut first).await.unwrap();

        let mut second = record(CookieDuration::minutes(30));
        second.id = first.id;
        store.create(&mut second).await.unwrap();

        assert_ne!(first.id, second.id);
    }
}
