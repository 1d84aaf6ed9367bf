use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, Set};
use serde::Serialize;

use crate::list_codec;

/// Named inspection form in the `forms` table.
///
/// `name` doubles as the production-area label a reviewer is matched
/// against. `tasks` holds the ordered task-id list in its encoded text form;
/// use [`Model::task_ids`] to read it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "forms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub tasks: String,
    pub addition: Option<String>,
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
        task_ids: &[i64],
        addition: Option<&str>,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            name: Set(name.to_string()),
            tasks: Set(list_codec::encode(task_ids)),
            addition: Set(addition.map(str::to_string)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Look up the form bound to a production area.
    pub async fn get_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Self>, DbErr> {
        Entity::find().filter(Column::Name.eq(name)).one(db).await
    }

    pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find().all(db).await
    }

    /// Replace the form's ordered task list.
    pub async fn edit_tasks(
        db: &DatabaseConnection,
        id: i64,
        task_ids: &[i64],
    ) -> Result<Self, DbErr> {
        let Some(form) = Self::get_by_id(db, id).await? else {
            return Err(DbErr::RecordNotFound("Form not found".into()));
        };

        let mut active = form.into_active_model();
        active.tasks = Set(list_codec::encode(task_ids));
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        if let Some(form) = Self::get_by_id(db, id).await? {
            form.delete(db).await.map(|_| ())
        } else {
            Err(DbErr::RecordNotFound("Form not found".into()))
        }
    }

    /// Decoded ordered task-id list.
    pub fn task_ids(&self) -> Vec<i64> {
        list_codec::decode(&self.tasks)
    }
}
