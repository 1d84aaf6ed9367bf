use crate::seed::Seeder;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use db::models::user::AccessLevel;
use db::models::{form, planned_check, user};
use sea_orm::{DatabaseConnection, DbErr};

pub struct PlannedCheckSeeder;

#[async_trait]
impl Seeder for PlannedCheckSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let reviewers: Vec<i64> = user::Model::get_all(db)
            .await?
            .into_iter()
            .filter(|u| u.access_level == AccessLevel::OfficeWorker)
            .map(|u| u.id)
            .collect();
        let forms = form::Model::get_all(db).await?;

        let now = Utc::now();
        for (offset_days, form) in forms.iter().enumerate() {
            for &reviewer_id in &reviewers {
                planned_check::Model::create(
                    db,
                    now + Duration::days(offset_days as i64 + 1),
                    form.id,
                    reviewer_id,
                )
                .await?;
            }
        }

        Ok(())
    }
}
