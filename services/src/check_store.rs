//! Persistence for finalized checks.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::error::ServiceError;
use db::models::check;

/// A completed run ready to be written as one check row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCheck {
    pub form_id: i64,
    /// Per-task 0/1 verdicts in task order.
    pub grades: Vec<i64>,
    /// Unordered bag of error-record references; no positional relation to
    /// `grades`.
    pub error_ids: Vec<i64>,
    pub reviewer_id: i64,
    pub addition: Option<String>,
}

/// Store for finalized checks. `insert` must be all-or-nothing: a partially
/// written check is never observable.
#[async_trait]
pub trait CheckStore: Send + Sync {
    async fn insert(&self, check: NewCheck) -> Result<i64, ServiceError>;
}

/// Check store backed by the `checks` table. A single row insert, so
/// atomicity comes for free.
#[derive(Clone)]
pub struct DbCheckStore {
    db: DatabaseConnection,
}

impl DbCheckStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CheckStore for DbCheckStore {
    async fn insert(&self, new: NewCheck) -> Result<i64, ServiceError> {
        let check = check::Model::create(
            &self.db,
            new.form_id,
            &new.grades,
            &new.error_ids,
            new.reviewer_id,
            new.addition.as_deref(),
        )
        .await?;
        log::info!(
            "stored check {} for form {} by reviewer {}",
            check.id,
            check.form_id,
            check.reviewer_id
        );
        Ok(check.id)
    }
}
