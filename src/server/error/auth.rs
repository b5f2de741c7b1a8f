use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("CSRF token validation failed")]
    CsrfValidationFailed,
    #[error("Admin is not authenticated")]
    NotAuthenticated,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // The CSRF message stays deliberately vague; the security log
        // carries the specifics.
        let (status, message) = match self {
            AuthError::CsrfValidationFailed => (
                StatusCode::BAD_REQUEST,
                "Invalid request. Please refresh the page and try again.",
            ),
            AuthError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Authentication required."),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
