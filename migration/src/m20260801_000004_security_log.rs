use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SecurityLog::Table)
                    .if_not_exists()
                    .col(pk_auto(SecurityLog::Id))
                    .col(string_len(SecurityLog::EventType, 64))
                    .col(text(SecurityLog::Description))
                    .col(string_len(SecurityLog::IpAddress, 45))
                    .col(timestamp(SecurityLog::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SecurityLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SecurityLog {
    #[sea_orm(iden = "security_logs")]
    Table,
    Id,
    EventType,
    Description,
    IpAddress,
    CreatedAt,
}
