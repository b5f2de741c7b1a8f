//! Admin authentication flow tests: lockout behavior and the security
//! log trail.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::Form;
use chrono::{Duration, Utc};
use registro::server::config::Settings;
use registro::server::controller::admin::{login, LoginForm};
use registro::server::controller::util::issue_csrf;
use registro::server::model::app::AppState;
use registro::server::model::session::{SessionAdmin, SessionCsrfToken, SessionLogoutNotice};
use registro::server::service::auth::{self, LockoutPolicy, LoginOutcome, LoginService};
use registro::server::service::rate_limit::RateLimitPolicy;
use registro_test_utils::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

fn policy() -> LockoutPolicy {
    LockoutPolicy::new(5, 30 * 60)
}

fn app_state(test: &TestSetup) -> AppState {
    AppState {
        db: test.state.db.clone(),
        settings: Settings {
            upload_dir: test.upload_root().to_path_buf(),
            upload_max_bytes: 5 * 1024 * 1024,
            login: policy(),
            rate_limit: RateLimitPolicy::new(10, 3600),
        },
    }
}

#[tokio::test]
async fn five_failures_lock_out_even_correct_credentials() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    fixtures::admin::create_admin(&test.state.db).await?;
    let service = LoginService::new(&test.state.db, policy());

    for attempt in 1..=4 {
        let outcome = service
            .login(TEST_ADMIN_USERNAME, "wrong", TEST_CLIENT_IP)
            .await
            .unwrap();
        let LoginOutcome::InvalidCredentials { attempts_remaining } = outcome else {
            panic!("attempt {attempt}: expected invalid credentials, got {outcome:?}");
        };
        assert_eq!(attempts_remaining, 5 - attempt);
    }

    let fifth = service
        .login(TEST_ADMIN_USERNAME, "wrong", TEST_CLIENT_IP)
        .await
        .unwrap();
    assert!(matches!(fifth, LoginOutcome::JustLocked { lockout_minutes: 30 }));

    // Correct credentials are still rejected while the lock holds.
    let sixth = service
        .login(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD, TEST_CLIENT_IP)
        .await
        .unwrap();
    assert!(matches!(sixth, LoginOutcome::LockedOut { .. }));

    Ok(())
}

#[tokio::test]
async fn expired_lock_allows_correct_login_and_resets_counter() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let admin = fixtures::admin::create_admin_with_state(
        &test.state.db,
        5,
        Some((Utc::now() - Duration::minutes(1)).naive_utc()),
    )
    .await?;
    let service = LoginService::new(&test.state.db, policy());

    let outcome = service
        .login(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD, TEST_CLIENT_IP)
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::Success { .. }));

    let stored = entity::prelude::AdminUser::find_by_id(admin.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(stored.failed_login_attempts, 0);
    assert!(stored.locked_until.is_none());
    assert!(stored.last_login.is_some());

    Ok(())
}

#[tokio::test]
async fn every_login_outcome_leaves_a_security_log_trail() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    fixtures::admin::create_admin(&test.state.db).await?;
    let service = LoginService::new(&test.state.db, policy());

    service
        .login("nobody", "whatever", TEST_CLIENT_IP)
        .await
        .unwrap();
    service
        .login(TEST_ADMIN_USERNAME, "wrong", TEST_CLIENT_IP)
        .await
        .unwrap();
    service
        .login(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD, TEST_CLIENT_IP)
        .await
        .unwrap();

    for event_type in ["login_fail_unknown_user", "login_fail", "login_success"] {
        let count = entity::prelude::SecurityLog::find()
            .filter(entity::security_log::Column::EventType.eq(event_type))
            .all(&test.state.db)
            .await?
            .len();
        assert_eq!(count, 1, "missing log entry for {event_type}");
    }

    Ok(())
}

#[tokio::test]
async fn missing_credentials_rotate_the_csrf_token() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;
    let addr: SocketAddr = format!("{TEST_CLIENT_IP}:443").parse().unwrap();

    let issued = issue_csrf(&test.session).await.unwrap();

    let response = login(
        State(app_state(&test)),
        ConnectInfo(addr),
        test.session.clone(),
        Form(LoginForm {
            username: String::new(),
            password: String::new(),
            csrf_token: issued.clone(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The submitted token is spent like on any other failed login.
    let current = SessionCsrfToken::get(&test.session).await.unwrap();
    assert!(current.is_some());
    assert_ne!(current, Some(issued));

    Ok(())
}

#[tokio::test]
async fn logout_destroys_session_and_notice_is_one_time() -> Result<(), TestError> {
    let test = test_setup_with_registration_tables!()?;

    let identity = SessionAdmin {
        admin_id: 1,
        username: TEST_ADMIN_USERNAME.to_string(),
        full_name: "Test Admin".to_string(),
        role: "admin".to_string(),
    };
    SessionAdmin::insert(&test.session, &identity).await.unwrap();

    let notice = auth::logout(&test.state.db, &test.session, TEST_CLIENT_IP)
        .await
        .unwrap();
    assert_eq!(notice, "You have been successfully logged out.");

    assert!(SessionAdmin::get(&test.session).await.unwrap().is_none());

    let first = SessionLogoutNotice::take(&test.session).await.unwrap();
    let second = SessionLogoutNotice::take(&test.session).await.unwrap();
    assert_eq!(first, Some(notice));
    assert_eq!(second, None);

    let logged = entity::prelude::SecurityLog::find()
        .filter(entity::security_log::Column::EventType.eq("logout"))
        .all(&test.state.db)
        .await?;
    assert_eq!(logged.len(), 1);

    Ok(())
}
