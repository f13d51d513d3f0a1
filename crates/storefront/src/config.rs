//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `ORDER_SUBMIT_LATENCY_MS` - Simulated kitchen latency (default: 1500)
//! - `ORDER_SUBMIT_TIMEOUT_MS` - Per-attempt submission timeout (default: 10000)
//! - `ORDER_SUBMIT_MAX_ATTEMPTS` - Attempts before giving up, at least 1 (default: 3)
//! - `ORDER_SUBMIT_BACKOFF_MS` - Linear backoff step between attempts (default: 250)
//! - `SESSION_IDLE_SECONDS` - Idle time before a session's order is dropped (default: 3600)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Order submission settings
    pub kitchen: KitchenConfig,
    /// How long an idle session keeps its order
    pub session_idle: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// How orders are handed to the kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KitchenConfig {
    /// Latency of the simulated kitchen.
    pub latency: Duration,
    /// Upper bound on a single submission attempt.
    pub timeout: Duration,
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff step; attempt `n` waits `n × backoff` before retrying.
    pub backoff: Duration,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(1500),
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            kitchen: KitchenConfig::default(),
            session_idle: Duration::from_secs(3600),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let kitchen_defaults = KitchenConfig::default();

        let max_attempts = parse_or(
            &lookup,
            "ORDER_SUBMIT_MAX_ATTEMPTS",
            kitchen_defaults.max_attempts,
        )?;
        if max_attempts == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ORDER_SUBMIT_MAX_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let kitchen = KitchenConfig {
            latency: millis_or(&lookup, "ORDER_SUBMIT_LATENCY_MS", kitchen_defaults.latency)?,
            timeout: millis_or(&lookup, "ORDER_SUBMIT_TIMEOUT_MS", kitchen_defaults.timeout)?,
            max_attempts,
            backoff: millis_or(&lookup, "ORDER_SUBMIT_BACKOFF_MS", kitchen_defaults.backoff)?,
        };

        let session_idle = Duration::from_secs(parse_or(
            &lookup,
            "SESSION_IDLE_SECONDS",
            defaults.session_idle.as_secs(),
        )?);

        Ok(Self {
            host: parse_or(&lookup, "STOREFRONT_HOST", defaults.host)?,
            port: parse_or(&lookup, "STOREFRONT_PORT", defaults.port)?,
            base_url: lookup("STOREFRONT_BASE_URL").unwrap_or(defaults.base_url),
            kitchen,
            session_idle,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.trim().is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a millisecond count into a `Duration`.
fn millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parse_or(lookup, key, default_ms).map(Duration::from_millis)
}
