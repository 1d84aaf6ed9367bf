use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::user::{AccessLevel, Model};
use fake::{Fake, faker::name::en::Name};
use sea_orm::{DatabaseConnection, DbErr};

pub struct UserSeeder;

#[async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Fixed users, one per access level.
        Model::create(db, "admin", AccessLevel::Admin, None).await?;
        Model::create(db, "shift manager", AccessLevel::Manager, None).await?;
        Model::create(db, "inspector", AccessLevel::OfficeWorker, Some("assembly")).await?;
        Model::create(db, "assembly leader", AccessLevel::Leader, Some("assembly")).await?;

        // Random line workers spread over the two seeded areas.
        for _ in 0..8 {
            let name: String = Name().fake();
            let area = if fastrand::bool() { "assembly" } else { "paint shop" };
            Model::create(db, &name, AccessLevel::Worker, Some(area)).await?;
        }

        Ok(())
    }
}
