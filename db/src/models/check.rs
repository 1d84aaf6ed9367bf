use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Serialize;

use crate::grade::CheckStats;
use crate::list_codec;

/// Finalized inspection outcome in the `checks` table.
///
/// Written exactly once when a run completes and immutable afterwards.
/// `grades` and `errors_ids` hold encoded integer lists; `errors_ids` is an
/// unordered bag of error references with no positional relation to
/// `grades`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "checks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub form_id: i64,
    pub grades: String,
    pub errors_ids: String,
    pub reviewer_id: i64,
    pub addition: Option<String>,
    pub checked_at: DateTime<Utc>,
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
    /// Write one finalized check row. A single insert, so the row is
    /// all-or-nothing; `checked_at` is the insertion instant.
    pub async fn create(
        db: &DatabaseConnection,
        form_id: i64,
        grades: &[i64],
        error_ids: &[i64],
        reviewer_id: i64,
        addition: Option<&str>,
    ) -> Result<Self, DbErr> {
        let active = ActiveModel {
            form_id: Set(form_id),
            grades: Set(list_codec::encode(grades)),
            errors_ids: Set(list_codec::encode(error_ids)),
            reviewer_id: Set(reviewer_id),
            addition: Set(addition.map(str::to_string)),
            checked_at: Set(Utc::now()),
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

    /// All checks recorded for a form, most recent first.
    pub async fn get_by_form(db: &DatabaseConnection, form_id: i64) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::FormId.eq(form_id))
            .order_by_desc(Column::CheckedAt)
            .all(db)
            .await
    }

    /// Administrative delete; never reached from the run flow.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        if let Some(check) = Self::get_by_id(db, id).await? {
            check.delete(db).await.map(|_| ())
        } else {
            Err(DbErr::RecordNotFound("Check not found".into()))
        }
    }

    /// Decoded grade list, in task order.
    pub fn grade_list(&self) -> Vec<i64> {
        list_codec::decode(&self.grades)
    }

    /// Decoded error-id list.
    pub fn error_ids(&self) -> Vec<i64> {
        list_codec::decode(&self.errors_ids)
    }

    /// Statistics recomputed from the stored grades; nothing derived is
    /// persisted.
    pub fn stats(&self) -> CheckStats {
        CheckStats::from_encoded(&self.grades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::ScoreBand;
    use crate::models::form;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn stored_encoding_matches_wire_contract() {
        let db = setup_test_db().await;

        let form = form::Model::create(&db, "assembly", &[1, 2, 3], None)
            .await
            .unwrap();
        let check = Model::create(&db, form.id, &[1, 0, 1], &[9], 555, None)
            .await
            .unwrap();

        assert_eq!(check.grades, "1, 0, 1");
        assert_eq!(check.errors_ids, "9");
        assert_eq!(check.grade_list(), vec![1, 0, 1]);
        assert_eq!(check.error_ids(), vec![9]);

        let stats = check.stats();
        assert_eq!(stats.score, 4.0);
        assert_eq!(stats.band, ScoreBand::Medium);
    }

    #[tokio::test]
    async fn per_form_listing_is_most_recent_first() {
        let db = setup_test_db().await;

        let form = form::Model::create(&db, "paint shop", &[1], None).await.unwrap();
        let first = Model::create(&db, form.id, &[1], &[], 1, None).await.unwrap();
        let second = Model::create(&db, form.id, &[0], &[], 1, None).await.unwrap();

        let listed = Model::get_by_form(&db, form.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].checked_at >= listed[1].checked_at);
        let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
        assert!(ids.contains(&first.id) && ids.contains(&second.id));
    }
}
