pub use sea_orm_migration::prelude::*;

mod m20260801_000001_registration;
mod m20260801_000002_team_member;
mod m20260801_000003_admin_user;
mod m20260801_000004_security_log;
mod m20260801_000005_rate_limit;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_registration::Migration),
            Box::new(m20260801_000002_team_member::Migration),
            Box::new(m20260801_000003_admin_user::Migration),
            Box::new(m20260801_000004_security_log::Migration),
            Box::new(m20260801_000005_rate_limit::Migration),
        ]
    }
}
