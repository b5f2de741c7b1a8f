//! Append-only security event log.
//!
//! Writes are best-effort: a broken log sink must never block the
//! user-facing operation that triggered the event.

use sea_orm::DatabaseConnection;

use crate::server::data::SecurityLogRepository;

/// Event type identifiers as stored in the log.
pub mod event {
    pub const REGISTRATION: &str = "registration";
    pub const RATE_LIMIT_EXCEEDED: &str = "rate_limit_exceeded";
    pub const CSRF_FAIL: &str = "csrf_fail";
    pub const LOGIN_CSRF_FAIL: &str = "login_csrf_fail";
    pub const LOGIN_SUCCESS: &str = "login_success";
    pub const LOGIN_FAIL: &str = "login_fail";
    pub const LOGIN_FAIL_UNKNOWN_USER: &str = "login_fail_unknown_user";
    pub const LOGIN_LOCKED: &str = "login_locked";
    pub const LOGIN_LOCKED_DUE_TO_ATTEMPTS: &str = "login_locked_due_to_attempts";
    pub const LOGOUT: &str = "logout";
    pub const ADMIN_ACTION: &str = "admin_action";
}

pub async fn record(
    db: &DatabaseConnection,
    event_type: &str,
    description: &str,
    ip_address: &str,
) {
    let repo = SecurityLogRepository::new(db);

    if let Err(error) = repo.create(event_type, description, ip_address).await {
        tracing::warn!(%error, event_type, "failed to write security log entry");
    }
}
