use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000001_registration::Registration;

static FK_TEAM_MEMBER_REGISTRATION_ID: &str = "fk_team_member_registration_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMember::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamMember::Id))
                    .col(integer(TeamMember::RegistrationId))
                    .col(string(TeamMember::FullName))
                    .col(string(TeamMember::ProofFile))
                    .col(timestamp(TeamMember::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TEAM_MEMBER_REGISTRATION_ID)
                    .from_tbl(TeamMember::Table)
                    .from_col(TeamMember::RegistrationId)
                    .to_tbl(Registration::Table)
                    .to_col(Registration::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_TEAM_MEMBER_REGISTRATION_ID)
                    .table(TeamMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TeamMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TeamMember {
    #[sea_orm(iden = "team_members")]
    Table,
    Id,
    RegistrationId,
    FullName,
    ProofFile,
    CreatedAt,
}
