//! Read-side aggregation and status mutation for the admin dashboard.

use std::collections::HashMap;

use entity::registration::RegistrationStatus;
use sea_orm::{ActiveEnum, DatabaseConnection};

use crate::server::data::{RegistrationRepository, TeamMemberRepository};
use crate::server::error::Error;
use crate::server::service::security_log::{self, event};

pub const RECENT_REGISTRATIONS_LIMIT: u64 = 10;

#[derive(Debug, PartialEq, Eq)]
pub struct RegistrationStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub incomplete: u64,
}

#[derive(Debug)]
pub struct RegistrationSummary {
    pub registration: entity::registration::Model,
    pub team_count: i64,
}

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn stats(&self) -> Result<RegistrationStats, Error> {
        let repo = RegistrationRepository::new(self.db);

        Ok(RegistrationStats {
            total: repo.count_all().await?,
            pending: repo.count_by_status(RegistrationStatus::Pending).await?,
            approved: repo.count_by_status(RegistrationStatus::Approved).await?,
            rejected: repo.count_by_status(RegistrationStatus::Rejected).await?,
            incomplete: repo.count_by_status(RegistrationStatus::Incomplete).await?,
        })
    }

    /// The most recent registrations joined with their member counts.
    pub async fn recent(&self, limit: u64) -> Result<Vec<RegistrationSummary>, Error> {
        let registrations = RegistrationRepository::new(self.db).list_recent(limit).await?;

        let ids: Vec<i32> = registrations.iter().map(|r| r.id).collect();
        let counts: HashMap<i32, i64> = TeamMemberRepository::new(self.db)
            .count_for_registrations(&ids)
            .await?
            .into_iter()
            .collect();

        Ok(registrations
            .into_iter()
            .map(|registration| {
                let team_count = counts.get(&registration.id).copied().unwrap_or(0);
                RegistrationSummary {
                    registration,
                    team_count,
                }
            })
            .collect())
    }

    /// Sets status and notes. Any status may move to any other; the
    /// lifecycle is an open enumeration, not a transition graph.
    pub async fn update_status(
        &self,
        id: i32,
        status: RegistrationStatus,
        admin_notes: Option<String>,
        admin_username: &str,
        client_ip: &str,
    ) -> Result<Option<entity::registration::Model>, Error> {
        let updated = RegistrationRepository::new(self.db)
            .update_status(id, status, admin_notes)
            .await?;

        if let Some(registration) = &updated {
            security_log::record(
                self.db,
                event::ADMIN_ACTION,
                &format!(
                    "Registration {} status set to {} by {}",
                    registration.registration_id,
                    status.to_value(),
                    admin_username
                ),
                client_ip,
            )
            .await;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_test_utils::prelude::*;

    mod stats {
        use super::*;

        #[tokio::test]
        async fn counts_by_status() -> Result<(), TestError> {
            let test = test_setup_with_registration_tables!()?;
            let service = DashboardService::new(&test.state.db);

            for (suffix, status) in [
                ("0001", RegistrationStatus::Pending),
                ("0002", RegistrationStatus::Pending),
                ("0003", RegistrationStatus::Approved),
                ("0004", RegistrationStatus::Rejected),
            ] {
                fixtures::registration::create_registration(
                    &test.state.db,
                    &format!("REG2026{suffix}"),
                    status,
                )
                .await?;
            }

            let stats = service.stats().await.unwrap();
            assert_eq!(
                stats,
                RegistrationStats {
                    total: 4,
                    pending: 2,
                    approved: 1,
                    rejected: 1,
                    incomplete: 0,
                }
            );

            Ok(())
        }
    }

    mod recent {
        use super::*;

        #[tokio::test]
        async fn joins_member_counts_and_respects_limit() -> Result<(), TestError> {
            let test = test_setup_with_registration_tables!()?;
            let service = DashboardService::new(&test.state.db);

            let first = fixtures::registration::create_registration(
                &test.state.db,
                "REG20260001",
                RegistrationStatus::Pending,
            )
            .await?;
            fixtures::registration::create_team_member(&test.state.db, first.id, "Ana Cruz")
                .await?;
            fixtures::registration::create_team_member(&test.state.db, first.id, "Jose Reyes")
                .await?;

            fixtures::registration::create_registration(
                &test.state.db,
                "REG20260002",
                RegistrationStatus::Pending,
            )
            .await?;

            let recent = service.recent(1).await.unwrap();
            assert_eq!(recent.len(), 1);

            let all = service.recent(10).await.unwrap();
            assert_eq!(all.len(), 2);

            let counts: Vec<i64> = {
                let mut pairs: Vec<(String, i64)> = all
                    .iter()
                    .map(|summary| {
                        (
                            summary.registration.registration_id.clone(),
                            summary.team_count,
                        )
                    })
                    .collect();
                pairs.sort();
                pairs.into_iter().map(|(_, count)| count).collect()
            };
            assert_eq!(counts, vec![2, 0]);

            Ok(())
        }
    }

    mod update_status {
        use super::*;
        use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

        #[tokio::test]
        async fn updates_and_logs_the_action() -> Result<(), TestError> {
            let test = test_setup_with_registration_tables!()?;
            let service = DashboardService::new(&test.state.db);

            let registration = fixtures::registration::create_registration(
                &test.state.db,
                "REG20260007",
                RegistrationStatus::Pending,
            )
            .await?;

            let updated = service
                .update_status(
                    registration.id,
                    RegistrationStatus::Approved,
                    Some("Payment verified".to_string()),
                    TEST_ADMIN_USERNAME,
                    TEST_CLIENT_IP,
                )
                .await
                .unwrap()
                .unwrap();
            assert_eq!(updated.status, RegistrationStatus::Approved);

            let logged = entity::prelude::SecurityLog::find()
                .filter(entity::security_log::Column::EventType.eq("admin_action"))
                .count(&test.state.db)
                .await?;
            assert_eq!(logged, 1);

            Ok(())
        }

        #[tokio::test]
        async fn unknown_id_updates_nothing_and_logs_nothing() -> Result<(), TestError> {
            let test = test_setup_with_registration_tables!()?;
            let service = DashboardService::new(&test.state.db);

            let updated = service
                .update_status(
                    42,
                    RegistrationStatus::Approved,
                    None,
                    TEST_ADMIN_USERNAME,
                    TEST_CLIENT_IP,
                )
                .await
                .unwrap();
            assert!(updated.is_none());

            let logged = entity::prelude::SecurityLog::find()
                .count(&test.state.db)
                .await?;
            assert_eq!(logged, 0);

            Ok(())
        }
    }
}
