//! HTTP middleware stack for the ordering API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions over a moka-backed store)
//! 5. API headers (nosniff, no framing, no caching)

pub mod api_headers;
pub mod request_id;
pub mod session;
pub mod session_store;

pub use api_headers::api_headers_middleware;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, flow_key};
pub use session_store::IdleSessionStore;
