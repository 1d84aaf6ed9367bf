//! Directory lookups: who a reviewer is and where they are assigned.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::error::ServiceError;
use db::models::user::{self, AccessLevel};

/// What the run flow needs to know about a reviewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub access_level: AccessLevel,
    /// Production area the reviewer is attached to, if any.
    pub part_name: Option<String>,
    pub available: bool,
}

/// User directory, injected into the run state machine.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn profile(&self, reviewer_id: i64) -> Result<Option<Profile>, ServiceError>;
}

/// Directory backed by the `users` table.
#[derive(Clone)]
pub struct DbDirectory {
    db: DatabaseConnection,
}

impl DbDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Directory for DbDirectory {
    async fn profile(&self, reviewer_id: i64) -> Result<Option<Profile>, ServiceError> {
        let user = user::Model::get_by_id(&self.db, reviewer_id).await?;
        Ok(user.map(|u| Profile {
            access_level: u.access_level,
            part_name: u.part_name,
            available: u.available,
        }))
    }
}
