use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic error payload returned for security violations and internal
/// failures. Never carries internal detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Cumulative validation errors for a rejected submission, surfaced
/// verbatim so the form can re-render them.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorsDto {
    pub errors: Vec<String>,
}

/// Confirmation payload for an accepted registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationAcceptedDto {
    pub registration_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CsrfTokenDto {
    pub csrf_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminIdentityDto {
    pub username: String,
    pub full_name: String,
    pub role: String,
}

/// Session snapshot for the admin UI. `notice` is a one-time message
/// (for example the logout farewell) consumed on read.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminSessionDto {
    pub authenticated: bool,
    pub admin: Option<AdminIdentityDto>,
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationStatsDto {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub incomplete: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationSummaryDto {
    pub id: i32,
    pub registration_id: String,
    pub institution: String,
    pub coach_name: String,
    pub status: String,
    pub team_count: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub stats: RegistrationStatsDto,
    pub recent: Vec<RegistrationSummaryDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdatedDto {
    pub registration_id: String,
    pub status: String,
}
