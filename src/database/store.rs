use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Log, NewLog};

/// Document store primitives for logs.
///
/// Every call is one round trip; callers sequence them and stop at the first
/// error.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// All logs newest first (`created_at` desc, then `id` desc). `owner`
    /// narrows the result to one user's logs without changing the order.
    async fn list(&self, owner: Option<Uuid>) -> Result<Vec<Log>, DatabaseError>;

    async fn find(&self, id: Uuid) -> Result<Option<Log>, DatabaseError>;

    async fn create(&self, log: NewLog) -> Result<Log, DatabaseError>;

    /// Shallow-merge `changes` into the content of log `id`
    async fn update(&self, id: Uuid, changes: Map<String, Value>) -> Result<(), DatabaseError>;

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// `find`, with a miss turned into `DatabaseError::NotFound`
    async fn find_404(&self, id: Uuid) -> Result<Log, DatabaseError> {
        self.find(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Log {} not found", id)))
    }
}
