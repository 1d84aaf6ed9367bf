use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Access level a user holds across the whole system.
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "access_level_enum")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AccessLevel {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "office_worker")]
    OfficeWorker,
    #[sea_orm(string_value = "leader")]
    Leader,
    #[sea_orm(string_value = "worker")]
    Worker,
}

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique display name.
    pub name: String,
    pub access_level: AccessLevel,
    /// Production area the user is attached to, if any.
    pub part_name: Option<String>,
    /// Whether the user may currently act in the system.
    pub available: bool,
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
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        access_level: AccessLevel,
        part_name: Option<&str>,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            name: Set(name.to_string()),
            access_level: Set(access_level),
            part_name: Set(part_name.map(str::to_string)),
            available: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn get_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Self>, DbErr> {
        Entity::find().filter(Column::Name.eq(name)).one(db).await
    }

    pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find().all(db).await
    }

    /// Attach the user to a production area, or detach with `None`.
    pub async fn set_part_name(
        db: &DatabaseConnection,
        id: i64,
        part_name: Option<&str>,
    ) -> Result<Self, DbErr> {
        let Some(user) = Self::get_by_id(db, id).await? else {
            return Err(DbErr::RecordNotFound("User not found".into()));
        };

        let mut active = user.into_active_model();
        active.part_name = Set(part_name.map(str::to_string));
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn set_available(
        db: &DatabaseConnection,
        id: i64,
        available: bool,
    ) -> Result<Self, DbErr> {
        let Some(user) = Self::get_by_id(db, id).await? else {
            return Err(DbErr::RecordNotFound("User not found".into()));
        };

        let mut active = user.into_active_model();
        active.available = Set(available);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        if let Some(user) = Self::get_by_id(db, id).await? {
            user.delete(db).await.map(|_| ())
        } else {
            Err(DbErr::RecordNotFound("User not found".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn create_and_reassign_area() {
        let db = setup_test_db().await;

        let user = Model::create(&db, "inspector-a", AccessLevel::OfficeWorker, None)
            .await
            .unwrap();
        assert_eq!(user.access_level, AccessLevel::OfficeWorker);
        assert!(user.available);
        assert_eq!(user.part_name, None);

        let user = Model::set_part_name(&db, user.id, Some("assembly")).await.unwrap();
        assert_eq!(user.part_name.as_deref(), Some("assembly"));

        let found = Model::get_by_name(&db, "inspector-a").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn access_level_round_trips_as_string() {
        assert_eq!(AccessLevel::OfficeWorker.to_string(), "office_worker");
        assert_eq!(
            "office_worker".parse::<AccessLevel>().unwrap(),
            AccessLevel::OfficeWorker
        );
    }
}
