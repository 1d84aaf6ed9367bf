use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, IntoActiveModel, Set};
use serde::Serialize;

/// Stored in place of an empty or absent comment; the column is NOT NULL.
pub const PLACEHOLDER_COMMENT: &str = "No comment provided";

/// Free-form failure detail in the `errors` table.
///
/// Rows are created once per saved failure and referenced from a check's
/// encoded error-id list. The run flow never deletes them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "errors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub comment: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
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
    /// Create an error record, coercing an empty/absent comment to the
    /// fixed placeholder.
    pub async fn create(
        db: &DatabaseConnection,
        comment: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<Self, DbErr> {
        let comment = match comment {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => PLACEHOLDER_COMMENT.to_string(),
        };

        let active = ActiveModel {
            comment: Set(comment),
            photo_url: Set(photo_url.map(str::to_string)),
            created_at: Set(Utc::now()),
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

    /// Administrative edit; the run flow never calls this.
    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        comment: &str,
        photo_url: Option<&str>,
    ) -> Result<Self, DbErr> {
        let Some(record) = Self::get_by_id(db, id).await? else {
            return Err(DbErr::RecordNotFound("Error record not found".into()));
        };

        let mut active = record.into_active_model();
        active.comment = Set(comment.to_string());
        active.photo_url = Set(photo_url.map(str::to_string));
        active.update(db).await
    }

    /// Administrative delete; the run flow never calls this.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        if let Some(record) = Self::get_by_id(db, id).await? {
            record.delete(db).await.map(|_| ())
        } else {
            Err(DbErr::RecordNotFound("Error record not found".into()))
        }
    }
}
