use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registration::Table)
                    .if_not_exists()
                    .col(pk_auto(Registration::Id))
                    .col(string(Registration::RegistrationId).unique_key())
                    .col(string(Registration::Institution))
                    .col(string(Registration::CoachName))
                    .col(string_len(Registration::PrcLicense, 50))
                    .col(date(Registration::PrcRegistrationDate))
                    .col(date(Registration::PrcExpirationDate))
                    .col(string_null(Registration::PaymentReference))
                    .col(string(Registration::NatconProofFile))
                    .col(string(Registration::PaymentProofFile))
                    .col(string_len(Registration::Status, 16).default("pending"))
                    .col(text_null(Registration::AdminNotes))
                    .col(timestamp(Registration::CreatedAt))
                    .col(timestamp(Registration::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registration::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Registration {
    #[sea_orm(iden = "registrations")]
    Table,
    Id,
    RegistrationId,
    Institution,
    CoachName,
    PrcLicense,
    PrcRegistrationDate,
    PrcExpirationDate,
    PaymentReference,
    NatconProofFile,
    PaymentProofFile,
    Status,
    AdminNotes,
    CreatedAt,
    UpdatedAt,
}
