//! Persistence for free-form failure detail.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::error::ServiceError;
use db::models::error_record;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub id: i64,
    pub comment: String,
    pub photo_url: Option<String>,
}

/// Store for failure detail records. `create` assigns the identifier; an
/// empty or absent comment is persisted as a fixed placeholder because the
/// column is NOT NULL. The run flow never deletes records.
#[async_trait]
pub trait ErrorStore: Send + Sync {
    async fn create(
        &self,
        comment: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<i64, ServiceError>;

    async fn get(&self, error_id: i64) -> Result<ErrorDetail, ServiceError>;
}

/// Error store backed by the `errors` table.
#[derive(Clone)]
pub struct DbErrorStore {
    db: DatabaseConnection,
}

impl DbErrorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ErrorStore for DbErrorStore {
    async fn create(
        &self,
        comment: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<i64, ServiceError> {
        let record = error_record::Model::create(&self.db, comment, photo_url).await?;
        log::debug!("created error record {}", record.id);
        Ok(record.id)
    }

    async fn get(&self, error_id: i64) -> Result<ErrorDetail, ServiceError> {
        let record = error_record::Model::get_by_id(&self.db, error_id)
            .await?
            .ok_or(ServiceError::NotFound("error record"))?;
        Ok(ErrorDetail {
            id: record.id,
            comment: record.comment,
            photo_url: record.photo_url,
        })
    }
}
