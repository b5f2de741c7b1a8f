use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::server::controller::registration::REGISTRATION_TAG;
use crate::server::error::Error;
use crate::server::service::captcha;

/// Get a fresh captcha challenge image
///
/// Replaces the session's expected captcha value, so this response must
/// never be cached.
#[utoipa::path(
    get,
    path = "/api/captcha",
    tag = REGISTRATION_TAG,
    responses(
        (status = 200, description = "PNG challenge image"),
        (status = 500, description = "Internal server error")
    ),
)]
pub async fn challenge(session: Session) -> Result<impl IntoResponse, Error> {
    let png = captcha::issue(&session).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        png,
    ))
}
