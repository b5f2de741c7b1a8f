use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct SecurityLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SecurityLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        event_type: &str,
        description: &str,
        ip_address: &str,
    ) -> Result<entity::security_log::Model, DbErr> {
        entity::security_log::ActiveModel {
            event_type: ActiveValue::Set(event_type.to_string()),
            description: ActiveValue::Set(description.to_string()),
            ip_address: ActiveValue::Set(ip_address.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
