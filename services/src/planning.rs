//! Scheduling view over planned checks. Read-heavy and not part of the run
//! state machine; managers use it to line up inspections and assign
//! reviewers.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::error::ServiceError;
use db::models::planned_check;

#[derive(Clone)]
pub struct PlanningService {
    db: DatabaseConnection,
}

impl PlanningService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn schedule(
        &self,
        scheduled_at: DateTime<Utc>,
        form_id: i64,
        reviewer_id: i64,
    ) -> Result<planned_check::Model, ServiceError> {
        let planned = planned_check::Model::create(&self.db, scheduled_at, form_id, reviewer_id).await?;
        log::info!(
            "planned check {} for form {} at {}",
            planned.id,
            form_id,
            scheduled_at
        );
        Ok(planned)
    }

    pub async fn reschedule(
        &self,
        id: i64,
        scheduled_at: DateTime<Utc>,
    ) -> Result<planned_check::Model, ServiceError> {
        Ok(planned_check::Model::reschedule(&self.db, id, scheduled_at).await?)
    }

    pub async fn reassign(
        &self,
        id: i64,
        reviewer_id: i64,
    ) -> Result<planned_check::Model, ServiceError> {
        Ok(planned_check::Model::reassign(&self.db, id, reviewer_id).await?)
    }

    pub async fn remove(&self, id: i64) -> Result<(), ServiceError> {
        Ok(planned_check::Model::delete(&self.db, id).await?)
    }

    /// Next planned checks from now on, soonest first.
    pub async fn upcoming(&self, limit: u64) -> Result<Vec<planned_check::Model>, ServiceError> {
        Ok(planned_check::Model::upcoming(&self.db, Utc::now(), limit).await?)
    }

    /// Planned checks whose time has passed without being rescheduled.
    pub async fn overdue(&self) -> Result<Vec<planned_check::Model>, ServiceError> {
        Ok(planned_check::Model::overdue(&self.db, Utc::now()).await?)
    }

    pub async fn for_form(&self, form_id: i64) -> Result<Vec<planned_check::Model>, ServiceError> {
        Ok(planned_check::Model::get_by_form(&self.db, form_id).await?)
    }

    pub async fn for_reviewer(
        &self,
        reviewer_id: i64,
    ) -> Result<Vec<planned_check::Model>, ServiceError> {
        Ok(planned_check::Model::get_by_reviewer(&self.db, reviewer_id).await?)
    }
}
