use sea_orm::entity::prelude::*;

/// Review lifecycle of a registration. Any status is reachable from any
/// other; admins move entries freely between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
pub enum RegistrationStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "incomplete")]
    Incomplete,
}

/// One team's competition entry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Human-readable identifier, `REG<year><4 digits>`.
    #[sea_orm(unique)]
    pub registration_id: String,

    pub institution: String,
    pub coach_name: String,

    /// PRC license number, 7-10 digits.
    pub prc_license: String,
    pub prc_registration_date: Date,
    pub prc_expiration_date: Date,

    #[sea_orm(nullable)]
    pub payment_reference: Option<String>,

    /// Stored filenames of the uploaded proofs, relative to the
    /// registration's upload directory.
    pub natcon_proof_file: String,
    pub payment_proof_file: String,

    pub status: RegistrationStatus,

    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMember,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
