use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::task::Model;
use sea_orm::{DatabaseConnection, DbErr};

pub struct TaskSeeder;

const TASK_INFOS: [&str; 6] = [
    "Machine guards mounted and undamaged",
    "Floor markings visible and intact",
    "Tools returned to their racks",
    "Emergency stop reachable and labeled",
    "Work surfaces free of loose parts",
    "Protective equipment worn by all workers",
];

#[async_trait]
impl Seeder for TaskSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for info in TASK_INFOS {
            Model::create(db, info).await?;
        }
        Ok(())
    }
}
