use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Serialize;

/// Scheduled inspection in the `planned_checks` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "planned_checks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub form_id: i64,
    pub reviewer_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form::Entity",
        from = "Column::FormId",
        to = "super::form::Column::Id"
    )]
    Form,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        scheduled_at: DateTime<Utc>,
        form_id: i64,
        reviewer_id: i64,
    ) -> Result<Self, DbErr> {
        let active = ActiveModel {
            scheduled_at: Set(scheduled_at),
            form_id: Set(form_id),
            reviewer_id: Set(reviewer_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Next planned checks at or after `now`, soonest first.
    pub async fn upcoming(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::ScheduledAt.gte(now))
            .order_by_asc(Column::ScheduledAt)
            .limit(limit)
            .all(db)
            .await
    }

    /// Planned checks whose scheduled time has passed, oldest first.
    pub async fn overdue(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::ScheduledAt.lt(now))
            .order_by_asc(Column::ScheduledAt)
            .all(db)
            .await
    }

    pub async fn get_by_form(db: &DatabaseConnection, form_id: i64) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::FormId.eq(form_id))
            .order_by_desc(Column::ScheduledAt)
            .all(db)
            .await
    }

    pub async fn get_by_reviewer(
        db: &DatabaseConnection,
        reviewer_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::ReviewerId.eq(reviewer_id))
            .order_by_asc(Column::ScheduledAt)
            .all(db)
            .await
    }

    pub async fn reschedule(
        db: &DatabaseConnection,
        id: i64,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Self, DbErr> {
        let Some(planned) = Self::get_by_id(db, id).await? else {
            return Err(DbErr::RecordNotFound("Planned check not found".into()));
        };

        let mut active = planned.into_active_model();
        active.scheduled_at = Set(scheduled_at);
        active.update(db).await
    }

    pub async fn reassign(
        db: &DatabaseConnection,
        id: i64,
        reviewer_id: i64,
    ) -> Result<Self, DbErr> {
        let Some(planned) = Self::get_by_id(db, id).await? else {
            return Err(DbErr::RecordNotFound("Planned check not found".into()));
        };

        let mut active = planned.into_active_model();
        active.reviewer_id = Set(reviewer_id);
        active.update(db).await
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        if let Some(planned) = Self::get_by_id(db, id).await? {
            planned.delete(db).await.map(|_| ())
        } else {
            Err(DbErr::RecordNotFound("Planned check not found".into()))
        }
    }
}
