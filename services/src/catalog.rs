//! Form/task catalog reads used by the run flow.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::error::ServiceError;
use db::models::{form, task};

/// A form as the run flow sees it: the area binding and the decoded,
/// ordered task-id list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub id: i64,
    pub name: String,
    pub task_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskInfo {
    pub id: i64,
    pub info: String,
}

/// Read-only catalog access, injected into the run state machine. The run
/// never mutates the catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn form_by_area(&self, area: &str) -> Result<Option<FormSnapshot>, ServiceError>;
    async fn task(&self, task_id: i64) -> Result<Option<TaskInfo>, ServiceError>;
}

/// Catalog backed by the `forms` and `tasks` tables.
#[derive(Clone)]
pub struct DbCatalog {
    db: DatabaseConnection,
}

impl DbCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Catalog for DbCatalog {
    async fn form_by_area(&self, area: &str) -> Result<Option<FormSnapshot>, ServiceError> {
        let form = form::Model::get_by_name(&self.db, area).await?;
        Ok(form.map(|f| FormSnapshot {
            id: f.id,
            task_ids: f.task_ids(),
            name: f.name,
        }))
    }

    async fn task(&self, task_id: i64) -> Result<Option<TaskInfo>, ServiceError> {
        let task = task::Model::get_by_id(&self.db, task_id).await?;
        Ok(task.map(|t| TaskInfo {
            id: t.id,
            info: t.info,
        }))
    }
}
