use sea_orm::entity::prelude::*;

/// An administrator account for the review dashboard.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Argon2id hash in PHC string format.
    pub password_hash: String,

    pub full_name: String,
    pub role: String,

    /// Consecutive failed logins since the last success.
    pub failed_login_attempts: i32,

    /// While set and in the future, logins are refused.
    #[sea_orm(nullable)]
    pub locked_until: Option<DateTime>,

    pub is_active: bool,

    #[sea_orm(nullable)]
    pub last_login: Option<DateTime>,

    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
