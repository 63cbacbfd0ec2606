use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::HasOwner;

/// Owning user as shown to clients, resolved to a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub username: Option<String>,
}

/// A log document: system fields plus free-form content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub id: Uuid,
    pub owner: Owner,
    #[serde(flatten)]
    pub content: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasOwner for Log {
    fn owner_id(&self) -> Uuid {
        self.owner.id
    }
}

/// A log that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewLog {
    pub owner_id: Uuid,
    pub content: Map<String, Value>,
}

/// Row shape of `logs LEFT JOIN users`
#[derive(Debug, FromRow)]
pub struct LogRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_username: Option<String>,
    pub content: Json<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LogRow> for Log {
    fn from(row: LogRow) -> Self {
        Self {
            id: row.id,
            owner: Owner {
                id: row.owner_id,
                username: row.owner_username,
            },
            content: row.content.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
