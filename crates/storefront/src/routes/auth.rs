//! Sign-in and registration route handlers.
//!
//! Both forms are validated and acknowledged only. No account is created and
//! no credential is checked, so nothing is written to the session either.

use axum::Json;
use tracing::instrument;

use super::NoticeResponse;
use crate::error::Result;
use crate::services::{LoginForm, RegisterForm};

/// Sign in.
///
/// POST /auth/login
#[instrument(skip_all)]
pub async fn login(Json(form): Json<LoginForm>) -> Result<Json<NoticeResponse>> {
    let notice = form.submit()?;
    Ok(Json(NoticeResponse::success(notice)))
}

/// Create an account.
///
/// POST /auth/register
#[instrument(skip_all)]
pub async fn register(Json(form): Json<RegisterForm>) -> Result<Json<NoticeResponse>> {
    let notice = form.submit()?;
    Ok(Json(NoticeResponse::success(notice)))
}
