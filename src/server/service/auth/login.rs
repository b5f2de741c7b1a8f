//! Admin login and logout flows.
//!
//! Every outcome, including the failures, leaves a security log entry.
//! Unknown usernames and wrong passwords produce the same user-facing
//! message; only the log distinguishes them.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::data::AdminUserRepository;
use crate::server::error::Error;
use crate::server::model::session::{SessionAdmin, SessionLogoutNotice};
use crate::server::service::auth::lockout::{
    remaining_minutes, AccountStanding, FailureOutcome, LockoutPolicy,
};
use crate::server::service::auth::password;
use crate::server::service::security_log::{self, event};

pub const LOGOUT_NOTICE: &str = "You have been successfully logged out.";

#[derive(Debug)]
pub enum LoginOutcome {
    Success { admin: entity::admin_user::Model },
    UnknownUser,
    InvalidCredentials { attempts_remaining: i32 },
    LockedOut { minutes_remaining: i64 },
    JustLocked { lockout_minutes: i64 },
}

pub struct LoginService<'a> {
    db: &'a DatabaseConnection,
    policy: LockoutPolicy,
}

impl<'a> LoginService<'a> {
    pub fn new(db: &'a DatabaseConnection, policy: LockoutPolicy) -> Self {
        Self { db, policy }
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
        client_ip: &str,
    ) -> Result<LoginOutcome, Error> {
        let repo = AdminUserRepository::new(self.db);

        let Some(admin) = repo.find_active_by_username(username).await? else {
            security_log::record(
                self.db,
                event::LOGIN_FAIL_UNKNOWN_USER,
                &format!("Login attempt for unknown username: {username}"),
                client_ip,
            )
            .await;
            return Ok(LoginOutcome::UnknownUser);
        };

        let now = Utc::now().naive_utc();

        if let AccountStanding::Locked { until } = self.policy.standing(admin.locked_until, now) {
            security_log::record(
                self.db,
                event::LOGIN_LOCKED,
                &format!("Login attempt for locked account: {username}"),
                client_ip,
            )
            .await;
            return Ok(LoginOutcome::LockedOut {
                minutes_remaining: remaining_minutes(until, now),
            });
        }

        if password::verify_password(password, &admin.password_hash) {
            let admin = repo.record_login_success(admin).await?;
            security_log::record(
                self.db,
                event::LOGIN_SUCCESS,
                &format!("Admin login: {username}"),
                client_ip,
            )
            .await;
            return Ok(LoginOutcome::Success { admin });
        }

        match self.policy.register_failure(admin.failed_login_attempts, now) {
            FailureOutcome::LockedOut { attempts, until } => {
                repo.record_login_failure(admin, attempts, Some(until)).await?;
                security_log::record(
                    self.db,
                    event::LOGIN_LOCKED_DUE_TO_ATTEMPTS,
                    &format!("Account locked after {attempts} failed attempts: {username}"),
                    client_ip,
                )
                .await;
                Ok(LoginOutcome::JustLocked {
                    lockout_minutes: self.policy.lockout.num_minutes(),
                })
            }
            FailureOutcome::AttemptsRemaining { attempts, remaining } => {
                repo.record_login_failure(admin, attempts, None).await?;
                security_log::record(
                    self.db,
                    event::LOGIN_FAIL,
                    &format!("Failed login attempt {attempts} for: {username}"),
                    client_ip,
                )
                .await;
                Ok(LoginOutcome::InvalidCredentials {
                    attempts_remaining: remaining,
                })
            }
        }
    }
}

/// Destroys the session and plants the one-time farewell notice for the
/// next anonymous page view.
pub async fn logout(
    db: &DatabaseConnection,
    session: &Session,
    client_ip: &str,
) -> Result<String, Error> {
    if let Some(admin) = SessionAdmin::get(session).await? {
        security_log::record(
            db,
            event::LOGOUT,
            &format!("Admin logout: {}", admin.username),
            client_ip,
        )
        .await;
    }

    session.flush().await?;
    SessionLogoutNotice::insert(session, LOGOUT_NOTICE).await?;

    Ok(LOGOUT_NOTICE.to_string())
}
