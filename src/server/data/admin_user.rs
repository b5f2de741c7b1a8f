use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct AdminUserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminUserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inactive accounts are treated the same as missing accounts so a
    /// disabled admin cannot tell the difference.
    pub async fn find_active_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::admin_user::Model>, DbErr> {
        entity::prelude::AdminUser::find()
            .filter(entity::admin_user::Column::Username.eq(username))
            .filter(entity::admin_user::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    /// Resets the failure counter, clears any lock, and stamps last login.
    pub async fn record_login_success(
        &self,
        admin: entity::admin_user::Model,
    ) -> Result<entity::admin_user::Model, DbErr> {
        let mut active: entity::admin_user::ActiveModel = admin.into();
        active.failed_login_attempts = ActiveValue::Set(0);
        active.locked_until = ActiveValue::Set(None);
        active.last_login = ActiveValue::Set(Some(Utc::now().naive_utc()));

        active.update(self.db).await
    }

    pub async fn record_login_failure(
        &self,
        admin: entity::admin_user::Model,
        failed_login_attempts: i32,
        locked_until: Option<NaiveDateTime>,
    ) -> Result<entity::admin_user::Model, DbErr> {
        let mut active: entity::admin_user::ActiveModel = admin.into();
        active.failed_login_attempts = ActiveValue::Set(failed_login_attempts);
        active.locked_until = ActiveValue::Set(locked_until);

        active.update(self.db).await
    }
}
