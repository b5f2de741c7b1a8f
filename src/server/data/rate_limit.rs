use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct RateLimitRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RateLimitRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn count_since(
        &self,
        ip_address: &str,
        since: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        entity::prelude::RateLimit::find()
            .filter(entity::rate_limit::Column::IpAddress.eq(ip_address))
            .filter(entity::rate_limit::Column::CreatedAt.gte(since))
            .count(self.db)
            .await
    }

    pub async fn record(&self, ip_address: &str) -> Result<entity::rate_limit::Model, DbErr> {
        entity::rate_limit::ActiveModel {
            ip_address: ActiveValue::Set(ip_address.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn delete_older_than(&self, cutoff: NaiveDateTime) -> Result<DeleteResult, DbErr> {
        entity::prelude::RateLimit::delete_many()
            .filter(entity::rate_limit::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await
    }
}
