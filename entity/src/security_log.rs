use sea_orm::entity::prelude::*;

/// Append-only record of authentication and registration events.
/// Rows are never updated or deleted by the application.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "security_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub event_type: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub ip_address: String,

    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
