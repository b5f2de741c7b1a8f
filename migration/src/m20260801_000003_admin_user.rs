use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminUser::Id))
                    .col(string(AdminUser::Username).unique_key())
                    .col(string(AdminUser::PasswordHash))
                    .col(string(AdminUser::FullName))
                    .col(string_len(AdminUser::Role, 32))
                    .col(integer(AdminUser::FailedLoginAttempts).default(0))
                    .col(timestamp_null(AdminUser::LockedUntil))
                    .col(boolean(AdminUser::IsActive).default(true))
                    .col(timestamp_null(AdminUser::LastLogin))
                    .col(timestamp(AdminUser::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AdminUser {
    #[sea_orm(iden = "admin_users")]
    Table,
    Id,
    Username,
    PasswordHash,
    FullName,
    Role,
    FailedLoginAttempts,
    LockedUntil,
    IsActive,
    LastLogin,
    CreatedAt,
}
