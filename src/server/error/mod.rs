//! Application error types and their HTTP mappings.
//!
//! Domain errors carry their own response mapping; infrastructure errors
//! collapse into a generic 500 payload while the detail goes to the log.

pub mod auth;
pub mod config;
pub mod upload;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::model::api::ErrorDto;
use crate::server::error::auth::AuthError;
use crate::server::error::config::ConfigError;
use crate::server::error::upload::UploadError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    AuthError(#[from] AuthError),
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    UploadError(#[from] UploadError),
    #[error("Internal error: {0}")]
    InternalError(String),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    #[error(transparent)]
    MultipartError(#[from] axum::extract::multipart::MultipartError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    ImageError(#[from] image::ImageError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::AuthError(error) => error.into_response(),
            Error::MultipartError(error) => {
                tracing::debug!(%error, "rejecting malformed multipart body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "Malformed form submission.".to_string(),
                    }),
                )
                    .into_response()
            }
            Error::ConfigError(error) => InternalServerError(error).into_response(),
            Error::UploadError(error) => InternalServerError(error).into_response(),
            Error::InternalError(message) => InternalServerError(message).into_response(),
            Error::DbErr(error) => InternalServerError(error).into_response(),
            Error::SessionError(error) => InternalServerError(error).into_response(),
            Error::IoError(error) => InternalServerError(error).into_response(),
            Error::ImageError(error) => InternalServerError(error).into_response(),
        }
    }
}

/// Wrapper that logs the underlying error and answers with a generic
/// payload, keeping internal detail out of responses.
pub struct InternalServerError<E>(pub E);

impl<E> IntoResponse for InternalServerError<E>
where
    E: std::fmt::Display,
{
    fn into_response(self) -> Response {
        tracing::error!("Internal server error: {}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "An unexpected error occurred. Please try again later.".to_string(),
            }),
        )
            .into_response()
    }
}
