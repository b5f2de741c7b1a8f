use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub struct TeamMemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamMemberRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_for_registration(
        &self,
        registration_id: i32,
    ) -> Result<Vec<entity::team_member::Model>, DbErr> {
        entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::RegistrationId.eq(registration_id))
            .order_by_asc(entity::team_member::Column::Id)
            .all(self.db)
            .await
    }

    /// Member counts grouped by registration, one `(registration_id, count)`
    /// tuple per registration that has at least one member.
    pub async fn count_for_registrations(
        &self,
        registration_ids: &[i32],
    ) -> Result<Vec<(i32, i64)>, DbErr> {
        if registration_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::TeamMember::find()
            .select_only()
            .column(entity::team_member::Column::RegistrationId)
            .column_as(entity::team_member::Column::Id.count(), "member_count")
            .filter(entity::team_member::Column::RegistrationId.is_in(registration_ids.to_vec()))
            .group_by(entity::team_member::Column::RegistrationId)
            .into_tuple::<(i32, i64)>()
            .all(self.db)
            .await
    }
}
