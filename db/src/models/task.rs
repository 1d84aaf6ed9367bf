use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, IntoActiveModel, Set};
use serde::Serialize;

/// Inspection task description in the `tasks` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DatabaseConnection, info: &str) -> Result<Self, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            info: Set(info.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find().all(db).await
    }

    pub async fn edit(db: &DatabaseConnection, id: i64, info: &str) -> Result<Self, DbErr> {
        let Some(task) = Self::get_by_id(db, id).await? else {
            return Err(DbErr::RecordNotFound("Task not found".into()));
        };

        let mut active = task.into_active_model();
        active.info = Set(info.to_string());
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        if let Some(task) = Self::get_by_id(db, id).await? {
            task.delete(db).await.map(|_| ())
        } else {
            Err(DbErr::RecordNotFound("Task not found".into()))
        }
    }
}
