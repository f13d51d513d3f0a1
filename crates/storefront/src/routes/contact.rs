//! Contact form route handlers.

use axum::Json;
use tracing::instrument;

use super::NoticeResponse;
use crate::error::Result;
use crate::services::ContactForm;

/// Submit the contact form.
///
/// POST /contact
///
/// The message is logged and acknowledged; nothing is sent anywhere.
#[instrument(skip_all, fields(subject = %form.subject))]
pub async fn submit(Json(form): Json<ContactForm>) -> Result<Json<NoticeResponse>> {
    let notice = form.submit()?;
    Ok(Json(NoticeResponse::success(notice)))
}
