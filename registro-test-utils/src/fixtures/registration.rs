//! Registration row fixtures for dashboard and repository tests.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};

use crate::error::TestError;

/// Insert a registration row with plausible field values.
pub async fn create_registration(
    db: &DatabaseConnection,
    registration_id: &str,
    status: entity::registration::RegistrationStatus,
) -> Result<entity::registration::Model, TestError> {
    let now = Utc::now();

    let registration = entity::registration::ActiveModel {
        registration_id: ActiveValue::Set(registration_id.to_string()),
        institution: ActiveValue::Set("Test University".to_string()),
        coach_name: ActiveValue::Set("Maria Santos".to_string()),
        prc_license: ActiveValue::Set("1234567".to_string()),
        prc_registration_date: ActiveValue::Set((now - Duration::days(365)).date_naive()),
        prc_expiration_date: ActiveValue::Set((now + Duration::days(365)).date_naive()),
        payment_reference: ActiveValue::Set(None),
        natcon_proof_file: ActiveValue::Set("natcon.pdf".to_string()),
        payment_proof_file: ActiveValue::Set("payment.pdf".to_string()),
        status: ActiveValue::Set(status),
        admin_notes: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now.naive_utc()),
        updated_at: ActiveValue::Set(now.naive_utc()),
        ..Default::default()
    };

    Ok(registration.insert(db).await?)
}

/// Insert a team member row belonging to `registration_id` (database id).
pub async fn create_team_member(
    db: &DatabaseConnection,
    registration_id: i32,
    full_name: &str,
) -> Result<entity::team_member::Model, TestError> {
    let member = entity::team_member::ActiveModel {
        registration_id: ActiveValue::Set(registration_id),
        full_name: ActiveValue::Set(full_name.to_string()),
        proof_file: ActiveValue::Set("enrollment.pdf".to_string()),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(member.insert(db).await?)
}
