use chrono::{NaiveDate, Utc};
use entity::registration::RegistrationStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

/// Field set for a validated submission, ready to persist.
#[derive(Debug)]
pub struct NewRegistration {
    pub registration_id: String,
    pub institution: String,
    pub coach_name: String,
    pub prc_license: String,
    pub prc_registration_date: NaiveDate,
    pub prc_expiration_date: NaiveDate,
    pub payment_reference: Option<String>,
    pub natcon_proof_file: String,
    pub payment_proof_file: String,
    pub members: Vec<NewTeamMember>,
}

#[derive(Debug)]
pub struct NewTeamMember {
    pub full_name: String,
    pub proof_file: String,
}

pub struct RegistrationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn registration_id_exists(&self, registration_id: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Registration::find()
            .filter(entity::registration::Column::RegistrationId.eq(registration_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Inserts the registration and all team members in one transaction.
    /// A failure on any row rolls back every row.
    pub async fn create_with_members(
        &self,
        new: NewRegistration,
    ) -> Result<entity::registration::Model, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now().naive_utc();

        let registration = entity::registration::ActiveModel {
            registration_id: ActiveValue::Set(new.registration_id),
            institution: ActiveValue::Set(new.institution),
            coach_name: ActiveValue::Set(new.coach_name),
            prc_license: ActiveValue::Set(new.prc_license),
            prc_registration_date: ActiveValue::Set(new.prc_registration_date),
            prc_expiration_date: ActiveValue::Set(new.prc_expiration_date),
            payment_reference: ActiveValue::Set(new.payment_reference),
            natcon_proof_file: ActiveValue::Set(new.natcon_proof_file),
            payment_proof_file: ActiveValue::Set(new.payment_proof_file),
            status: ActiveValue::Set(RegistrationStatus::Pending),
            admin_notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for member in new.members {
            entity::team_member::ActiveModel {
                registration_id: ActiveValue::Set(registration.id),
                full_name: ActiveValue::Set(member.full_name),
                proof_file: ActiveValue::Set(member.proof_file),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(registration)
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::registration::Model>, DbErr> {
        entity::prelude::Registration::find_by_id(id).one(self.db).await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Registration::find().count(self.db).await
    }

    pub async fn count_by_status(&self, status: RegistrationStatus) -> Result<u64, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::Status.eq(status))
            .count(self.db)
            .await
    }

    pub async fn list_recent(
        &self,
        limit: u64,
    ) -> Result<Vec<entity::registration::Model>, DbErr> {
        entity::prelude::Registration::find()
            .order_by_desc(entity::registration::Column::CreatedAt)
            .order_by_desc(entity::registration::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        id: i32,
        status: RegistrationStatus,
        admin_notes: Option<String>,
    ) -> Result<Option<entity::registration::Model>, DbErr> {
        let Some(registration) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::registration::ActiveModel = registration.into();
        active.status = ActiveValue::Set(status);
        active.admin_notes = ActiveValue::Set(admin_notes);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(active.update(self.db).await?))
    }
}
