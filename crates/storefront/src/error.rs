//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Error bodies are JSON: `{ "error": "...", "notices": [...] }`, where
//! `notices` carries whatever the user should be shown alongside the failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use heights_bites_core::Notice;
use serde::Serialize;
use thiserror::Error;

use crate::services::{FlowError, FormError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The order flow refused the operation. Carries the notices drained
    /// from the flow.
    #[error("Order flow: {0}")]
    Flow(FlowError, Vec<Notice>),

    /// A submitted form did not validate.
    #[error("Form: {0}")]
    Form(#[from] FormError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        Self::Flow(err, Vec::new())
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    notices: Vec<Notice>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Flow(err, _) => match err {
                FlowError::EmptyCart | FlowError::AddressRequired => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                FlowError::SubmissionInProgress | FlowError::InvalidTransition { .. } => {
                    StatusCode::CONFLICT
                }
                FlowError::Submission(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn is_server_error(&self) -> bool {
        matches!(self, Self::Session(_) | Self::Flow(FlowError::Submission(_), _))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let (error, notices) = match self {
            Self::Session(_) => ("Internal server error".to_string(), Vec::new()),
            Self::Flow(FlowError::Submission(_), notices) => {
                ("Order submission failed".to_string(), notices)
            }
            Self::Flow(err, notices) => (err.to_string(), notices),
            Self::Form(err) => {
                let notice = err.notice();
                (err.to_string(), vec![notice])
            }
            Self::NotFound(what) => (format!("Not found: {what}"), Vec::new()),
        };

        (status, Json(ErrorBody { error, notices })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heights_bites_core::OrderPhase;

    use tower_sessions::session_store;

    use super::*;
    use crate::services::SubmitError;

    fn session_error(detail: &str) -> AppError {
        AppError::Session(session_store::Error::Backend(detail.to_string()).into())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("menu item 42".to_string());
        assert_eq!(err.to_string(), "Not found: menu item 42");

        let err = AppError::from(FlowError::EmptyCart);
        assert_eq!(err.to_string(), "Order flow: cart is empty");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(FlowError::EmptyCart.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(FlowError::AddressRequired.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(FlowError::SubmissionInProgress.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(
                FlowError::InvalidTransition {
                    operation: "add items",
                    phase: OrderPhase::Checkout
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(FlowError::Submission(SubmitError::Rejected("closed".to_string())).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(FormError::PasswordMismatch.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(session_error("test")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_body_carries_notices() {
        let notice = Notice::warning("Cart is empty", "Add something first.");
        let response = AppError::Flow(FlowError::EmptyCart, vec![notice]).into_response();

        let body = body_json(response).await;
        assert_eq!(body["error"], "cart is empty");
        assert_eq!(body["notices"][0]["title"], "Cart is empty");
        assert_eq!(body["notices"][0]["level"], "warning");
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response = session_error("store unreachable at 0xdeadbeef").into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");

        let response = AppError::from(FlowError::Submission(SubmitError::Unavailable(
            "10.0.0.7 refused connection".to_string(),
        )))
        .into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "Order submission failed");
    }

    #[tokio::test]
    async fn test_form_error_includes_its_notice() {
        let response = AppError::from(FormError::PasswordMismatch).into_response();
        let body = body_json(response).await;
        assert_eq!(body["notices"][0]["title"], "Passwords don't match");
    }
}
