use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::{form, task};
use sea_orm::{DatabaseConnection, DbErr};

pub struct FormSeeder;

#[async_trait]
impl Seeder for FormSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let task_ids: Vec<i64> = task::Model::get_all(db)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        // One form per seeded area, splitting the task catalog between them.
        let split = task_ids.len() / 2;
        form::Model::create(db, "assembly", &task_ids[..split], None).await?;
        form::Model::create(db, "paint shop", &task_ids[split..], Some("evening shift only"))
            .await?;

        Ok(())
    }
}
