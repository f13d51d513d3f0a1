//! Session middleware configuration.
//!
//! Sessions are kept in memory; the only thing stored in one is the key of
//! the visitor's order flow.
//!
//! A session record and the flow it points at share one lifetime: both are
//! dropped after `session_idle` without a request. Every response re-saves
//! the record, which pushes its expiry date out the same way each access
//! resets the flow's idle timer in [`FlowStore`](crate::services::FlowStore).

use tower_sessions::{Expiry, Session, SessionManagerLayer};
use uuid::Uuid;

use super::session_store::IdleSessionStore;
use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "hb_session";

/// Session key holding the order flow key.
const FLOW_KEY: &str = "order_flow";

/// Create the session layer with an in-memory store.
///
/// Sessions expire after the configured idle time, matching the lifetime of
/// the order flow they point at.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<IdleSessionStore> {
    let idle_seconds = i64::try_from(config.session_idle.as_secs()).unwrap_or(i64::MAX);

    SessionManagerLayer::new(IdleSessionStore::new())
        .with_name(SESSION_COOKIE_NAME)
        .with_always_save(true)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// The order flow key for this session, assigning one on first use.
///
/// # Errors
///
/// Returns the session store error if the key cannot be read or written.
pub async fn flow_key(session: &Session) -> Result<Uuid, tower_sessions::session::Error> {
    if let Some(key) = session.get::<Uuid>(FLOW_KEY).await? {
        return Ok(key);
    }

    let key = Uuid::new_v4();
    session.insert(FLOW_KEY, key).await?;
    Ok(key)
}
