use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use entity::registration::RegistrationStatus;
use sea_orm::ActiveEnum;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::model::api::{
    AdminIdentityDto, AdminSessionDto, DashboardDto, ErrorDto, RegistrationStatsDto,
    RegistrationSummaryDto, StatusUpdatedDto, ValidationErrorsDto,
};
use crate::server::controller::util::{require_admin, rotate_csrf, validate_csrf};
use crate::server::error::Error;
use crate::server::model::app::AppState;
use crate::server::model::session::{SessionAdmin, SessionLogoutNotice};
use crate::server::service::auth::{self, LoginOutcome, LoginService};
use crate::server::service::dashboard::{DashboardService, RECENT_REGISTRATIONS_LIMIT};
use crate::server::service::security_log::{self, event};

pub static ADMIN_TAG: &str = "admin";

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateForm {
    pub status: String,
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

/// Log in as an administrator
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Login succeeded", body = AdminIdentityDto),
        (status = 400, description = "CSRF validation failed or missing credentials", body = ErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 423, description = "Account locked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let client_ip = addr.ip().to_string();

    if let Err(error) = validate_csrf(&session, &form.csrf_token).await {
        security_log::record(
            &state.db,
            event::LOGIN_CSRF_FAIL,
            "CSRF token validation failed for admin login",
            &client_ip,
        )
        .await;
        if let Err(error) = rotate_csrf(&session).await {
            return error.into_response();
        }
        return error.into_response();
    }

    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return failed_login_response(&session, StatusCode::BAD_REQUEST, || {
            "Please enter both username and password.".to_string()
        })
        .await;
    }

    let service = LoginService::new(&state.db, state.settings.login);
    let outcome = match service.login(username, &form.password, &client_ip).await {
        Ok(outcome) => outcome,
        Err(error) => return error.into_response(),
    };

    match outcome {
        LoginOutcome::Success { admin } => {
            let identity = SessionAdmin {
                admin_id: admin.id,
                username: admin.username,
                full_name: admin.full_name,
                role: admin.role,
            };
            if let Err(error) = SessionAdmin::insert(&session, &identity).await {
                return error.into_response();
            }

            (
                StatusCode::OK,
                Json(AdminIdentityDto {
                    username: identity.username,
                    full_name: identity.full_name,
                    role: identity.role,
                }),
            )
                .into_response()
        }
        LoginOutcome::UnknownUser => {
            failed_login_response(&session, StatusCode::UNAUTHORIZED, || {
                "Invalid credentials.".to_string()
            })
            .await
        }
        LoginOutcome::InvalidCredentials { attempts_remaining } => {
            failed_login_response(&session, StatusCode::UNAUTHORIZED, || {
                format!("Invalid credentials. {attempts_remaining} attempts remaining.")
            })
            .await
        }
        LoginOutcome::LockedOut { minutes_remaining } => {
            failed_login_response(&session, StatusCode::LOCKED, || {
                format!("Account is locked. Please try again in {minutes_remaining} minutes.")
            })
            .await
        }
        LoginOutcome::JustLocked { lockout_minutes } => {
            failed_login_response(&session, StatusCode::LOCKED, || {
                format!("Too many failed attempts. Account locked for {lockout_minutes} minutes.")
            })
            .await
        }
    }
}

/// Log out the current administrator
#[utoipa::path(
    get,
    path = "/api/admin/logout",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Session destroyed", body = AdminSessionDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let client_ip = addr.ip().to_string();
    let notice = auth::logout(&state.db, &session, &client_ip).await?;

    Ok((
        StatusCode::OK,
        Json(AdminSessionDto {
            authenticated: false,
            admin: None,
            notice: Some(notice),
        }),
    ))
}

/// Get the current admin session state
///
/// Also delivers the one-time logout notice, clearing it in the process.
#[utoipa::path(
    get,
    path = "/api/admin/session",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Current session state", body = AdminSessionDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_session(session: Session) -> Result<impl IntoResponse, Error> {
    let admin = SessionAdmin::get(&session).await?;
    let notice = SessionLogoutNotice::take(&session).await?;

    Ok((
        StatusCode::OK,
        Json(AdminSessionDto {
            authenticated: admin.is_some(),
            admin: admin.map(|admin| AdminIdentityDto {
                username: admin.username,
                full_name: admin.full_name,
                role: admin.role,
            }),
            notice,
        }),
    ))
}

/// Get dashboard statistics and recent registrations
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Dashboard data", body = DashboardDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session).await?;

    let service = DashboardService::new(&state.db);
    let stats = service.stats().await?;
    let recent = service.recent(RECENT_REGISTRATIONS_LIMIT).await?;

    Ok((
        StatusCode::OK,
        Json(DashboardDto {
            stats: RegistrationStatsDto {
                total: stats.total,
                pending: stats.pending,
                approved: stats.approved,
                rejected: stats.rejected,
                incomplete: stats.incomplete,
            },
            recent: recent
                .into_iter()
                .map(|summary| RegistrationSummaryDto {
                    id: summary.registration.id,
                    registration_id: summary.registration.registration_id,
                    institution: summary.registration.institution,
                    coach_name: summary.registration.coach_name,
                    status: summary.registration.status.to_value(),
                    team_count: summary.team_count,
                    created_at: summary.registration.created_at,
                })
                .collect(),
        }),
    ))
}

/// Update a registration's review status
#[utoipa::path(
    post,
    path = "/api/admin/registrations/{id}/status",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Registration database id")
    ),
    responses(
        (status = 200, description = "Status updated", body = StatusUpdatedDto),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Registration not found", body = ErrorDto),
        (status = 422, description = "Unknown status value", body = ValidationErrorsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_status(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<StatusUpdateForm>,
) -> Response {
    let client_ip = addr.ip().to_string();

    let admin = match require_admin(&session).await {
        Ok(admin) => admin,
        Err(error) => return error.into_response(),
    };

    if let Err(error) = validate_csrf(&session, &form.csrf_token).await {
        security_log::record(
            &state.db,
            event::CSRF_FAIL,
            "CSRF token validation failed for status update",
            &client_ip,
        )
        .await;
        return error.into_response();
    }

    let Ok(status) = RegistrationStatus::try_from_value(&form.status) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorsDto {
                errors: vec!["Invalid status value.".to_string()],
            }),
        )
            .into_response();
    };

    let service = DashboardService::new(&state.db);
    match service
        .update_status(id, status, form.admin_notes, &admin.username, &client_ip)
        .await
    {
        Ok(Some(registration)) => (
            StatusCode::OK,
            Json(StatusUpdatedDto {
                registration_id: registration.registration_id,
                status: registration.status.to_value(),
            }),
        )
            .into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "Registration not found.".to_string(),
        ),
        Err(error) => error.into_response(),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorDto { error: message })).into_response()
}

/// Failed logins rotate the CSRF token so the submitted form value is
/// spent either way.
async fn failed_login_response(
    session: &Session,
    status: StatusCode,
    message: impl FnOnce() -> String,
) -> Response {
    if let Err(error) = rotate_csrf(session).await {
        return error.into_response();
    }

    error_response(status, message())
}
