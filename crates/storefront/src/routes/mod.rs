//! HTTP route handlers for the ordering API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Menu
//! GET  /menu                   - Menu grouped by category
//! GET  /menu/{category}        - Items of one category
//!
//! # Order flow (per session)
//! GET  /order                  - Current order
//! POST /order/cart/add         - Add one unit of an item
//! POST /order/cart/update      - Set a line's quantity
//! POST /order/cart/remove      - Remove a line
//! POST /order/checkout         - Proceed to checkout
//! POST /order/details          - Update address, notes, contactless
//! POST /order/place            - Place the order
//! POST /order/back             - Back to the menu
//! POST /order/restart          - Start a new order
//!
//! # Forms
//! POST /contact                - Contact form
//! POST /auth/login             - Sign in
//! POST /auth/register          - Create an account
//! ```

pub mod auth;
pub mod contact;
pub mod menu;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};
use heights_bites_core::Notice;
use serde::Serialize;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{api_headers_middleware, create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Response body for form submissions.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeResponse {
    pub success: bool,
    pub notices: Vec<Notice>,
}

impl NoticeResponse {
    /// A successful submission acknowledged by `notice`.
    #[must_use]
    pub fn success(notice: Notice) -> Self {
        Self {
            success: true,
            notices: vec![notice],
        }
    }
}

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/{category}", get(menu::category))
}

/// Create the order flow routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(order::show))
        .route("/cart/add", post(order::add))
        .route("/cart/update", post(order::update))
        .route("/cart/remove", post(order::remove))
        .route("/checkout", post(order::checkout))
        .route("/details", post(order::details))
        .route("/place", post(order::place))
        .route("/back", post(order::back))
        .route("/restart", post(order::restart))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
}

/// Create all routes for the ordering API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/menu", menu_routes())
        .nest("/order", order_routes())
        .route("/contact", post(contact::submit))
        .nest("/auth", auth_routes())
}

/// Build the complete application with middleware.
///
/// Used by the binary and by tests so both exercise the same stack.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(axum::middleware::from_fn(api_headers_middleware))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
