use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tower_sessions::Session;

use crate::model::api::{
    CsrfTokenDto, ErrorDto, RegistrationAcceptedDto, ValidationErrorsDto,
};
use crate::server::controller::util::{issue_csrf, validate_csrf};
use crate::server::error::Error;
use crate::server::model::app::AppState;
use crate::server::model::form::RegistrationForm;
use crate::server::service::registration::{SubmissionOutcome, SubmissionService};
use crate::server::service::security_log::{self, event};

pub static REGISTRATION_TAG: &str = "registration";

/// Submit a competition registration
#[utoipa::path(
    post,
    path = "/api/registrations",
    tag = REGISTRATION_TAG,
    responses(
        (status = 201, description = "Registration accepted", body = RegistrationAcceptedDto),
        (status = 400, description = "CSRF validation failed or malformed body", body = ErrorDto),
        (status = 422, description = "Submission rejected with validation errors", body = ValidationErrorsDto),
        (status = 429, description = "Rate limit exceeded", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    mut multipart: Multipart,
) -> Response {
    let client_ip = addr.ip().to_string();

    let form = match RegistrationForm::from_multipart(&mut multipart).await {
        Ok(form) => form,
        Err(error) => return error.into_response(),
    };

    // CSRF first; nothing else runs for a forged request.
    let submitted_token = form.csrf_token.as_deref().unwrap_or_default();
    if let Err(error) = validate_csrf(&session, submitted_token).await {
        security_log::record(
            &state.db,
            event::CSRF_FAIL,
            "CSRF token validation failed for registration submission",
            &client_ip,
        )
        .await;
        return error.into_response();
    }

    let service = SubmissionService::new(&state.db, &state.settings);
    match service.submit(&session, &form, &client_ip).await {
        Ok(SubmissionOutcome::Accepted { registration_id }) => (
            StatusCode::CREATED,
            Json(RegistrationAcceptedDto { registration_id }),
        )
            .into_response(),
        Ok(SubmissionOutcome::Rejected { errors }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorsDto { errors }),
        )
            .into_response(),
        Ok(SubmissionOutcome::RateLimited) => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorDto {
                error: "Too many submission attempts. Please try again later.".to_string(),
            }),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Get the session's CSRF token for the registration form
#[utoipa::path(
    get,
    path = "/api/csrf",
    tag = REGISTRATION_TAG,
    responses(
        (status = 200, description = "Token issued", body = CsrfTokenDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn csrf_token(session: Session) -> Result<impl IntoResponse, Error> {
    let token = issue_csrf(&session).await?;

    Ok((StatusCode::OK, Json(CsrfTokenDto { csrf_token: token })))
}
