use sea_orm_migration::{prelude::*, schema::*};

static IDX_RATE_LIMIT_IP_CREATED: &str = "idx_rate_limits_ip_address_created_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RateLimit::Table)
                    .if_not_exists()
                    .col(pk_auto(RateLimit::Id))
                    .col(string_len(RateLimit::IpAddress, 45))
                    .col(timestamp(RateLimit::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RATE_LIMIT_IP_CREATED)
                    .table(RateLimit::Table)
                    .col(RateLimit::IpAddress)
                    .col(RateLimit::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RATE_LIMIT_IP_CREATED)
                    .table(RateLimit::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RateLimit::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RateLimit {
    #[sea_orm(iden = "rate_limits")]
    Table,
    Id,
    IpAddress,
    CreatedAt,
}
