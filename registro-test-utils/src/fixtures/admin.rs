//! Admin account fixtures.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};

use crate::{
    constant::{TEST_ADMIN_PASSWORD, TEST_ADMIN_USERNAME},
    error::TestError,
};

/// Hash a plaintext password the same way the application does.
pub fn hash_password(password: &str) -> Result<String, TestError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| TestError::PasswordHash(err.to_string()))
}

/// Insert an active admin account with the default test credentials.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::admin_user::Model, TestError> {
    create_admin_with_state(db, 0, None).await
}

/// Insert an active admin account with a preset failure counter and lockout
/// expiry, for exercising the lockout paths.
pub async fn create_admin_with_state(
    db: &DatabaseConnection,
    failed_login_attempts: i32,
    locked_until: Option<NaiveDateTime>,
) -> Result<entity::admin_user::Model, TestError> {
    let admin = entity::admin_user::ActiveModel {
        username: ActiveValue::Set(TEST_ADMIN_USERNAME.to_string()),
        password_hash: ActiveValue::Set(hash_password(TEST_ADMIN_PASSWORD)?),
        full_name: ActiveValue::Set("Test Administrator".to_string()),
        role: ActiveValue::Set("admin".to_string()),
        failed_login_attempts: ActiveValue::Set(failed_login_attempts),
        locked_until: ActiveValue::Set(locked_until),
        is_active: ActiveValue::Set(true),
        last_login: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(admin.insert(db).await?)
}

/// Insert a deactivated admin account with the default test credentials.
pub async fn create_inactive_admin(
    db: &DatabaseConnection,
) -> Result<entity::admin_user::Model, TestError> {
    let admin = entity::admin_user::ActiveModel {
        username: ActiveValue::Set(TEST_ADMIN_USERNAME.to_string()),
        password_hash: ActiveValue::Set(hash_password(TEST_ADMIN_PASSWORD)?),
        full_name: ActiveValue::Set("Retired Administrator".to_string()),
        role: ActiveValue::Set("admin".to_string()),
        failed_login_attempts: ActiveValue::Set(0),
        locked_until: ActiveValue::Set(None),
        is_active: ActiveValue::Set(false),
        last_login: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(admin.insert(db).await?)
}
