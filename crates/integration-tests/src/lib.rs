//! Integration tests for Heights & Bites.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p heights-bites-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_flow` - The order controller driven through its public API
//! - `http_api` - The full axum stack driven with `tower::ServiceExt::oneshot`
//!
//! Nothing here needs a running server: [`TestApp`] sends requests straight
//! into the router and carries the session cookie between them.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test support: failures should panic the test that hit them.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::Utc;
use heights_bites_core::{OrderDraft, OrderReceipt};
use heights_bites_storefront::{
    AppState, Catalog, Kitchen, KitchenConfig, OrderSubmitter, StorefrontConfig, SubmitError, app,
};
use serde_json::Value;
use tower::ServiceExt;

// =============================================================================
// Kitchens
// =============================================================================

/// Kitchen policy for tests: no latency, short timeout, no backoff.
#[must_use]
pub fn fast_kitchen_config() -> KitchenConfig {
    KitchenConfig {
        latency: Duration::ZERO,
        timeout: Duration::from_secs(1),
        max_attempts: 3,
        backoff: Duration::ZERO,
    }
}

/// Fails the first `failures` submissions with `error`, then accepts.
pub struct FlakyKitchen {
    failures: u32,
    error: SubmitError,
    calls: AtomicU32,
}

impl FlakyKitchen {
    /// Fail `failures` times with `error` before succeeding.
    #[must_use]
    pub const fn new(failures: u32, error: SubmitError) -> Self {
        Self {
            failures,
            error,
            calls: AtomicU32::new(0),
        }
    }

    /// Refuse every order.
    #[must_use]
    pub fn closed() -> Self {
        Self::new(u32::MAX, SubmitError::Rejected("kitchen closed".to_string()))
    }

    /// Submissions seen so far.
    #[must_use]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderSubmitter for FlakyKitchen {
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderReceipt, SubmitError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(self.error.clone())
        } else {
            Ok(OrderReceipt::issue(draft, Utc::now()))
        }
    }
}

// =============================================================================
// HTTP harness
// =============================================================================

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Titles of the notices in the body, in order.
    #[must_use]
    pub fn notice_titles(&self) -> Vec<String> {
        self.body["notices"]
            .as_array()
            .map(|notices| {
                notices
                    .iter()
                    .filter_map(|notice| notice["title"].as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One browser session against an in-process app.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// App with a zero-latency simulated kitchen.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kitchen_config(fast_kitchen_config())
    }

    /// App with the simulated kitchen configured by `kitchen`.
    #[must_use]
    pub fn with_kitchen_config(kitchen: KitchenConfig) -> Self {
        Self::with_kitchen(Kitchen::simulated(&kitchen))
    }

    /// App with an arbitrary kitchen.
    #[must_use]
    pub fn with_submitter(submitter: Arc<dyn OrderSubmitter>) -> Self {
        Self::with_kitchen(Kitchen::new(submitter, &fast_kitchen_config()))
    }

    fn with_kitchen(kitchen: Kitchen) -> Self {
        let state = AppState::with_kitchen(
            StorefrontConfig::default(),
            Catalog::heights_and_bites(),
            kitchen,
        );
        Self {
            router: app(state),
            cookie: None,
        }
    }

    /// A second visitor on the same server, without this one's cookie.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Send a POST request with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
