use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Log, LogRow, NewLog, User};
use crate::database::store::LogStore;

const SELECT_LOGS: &str = r#"
    SELECT l.id, l.owner_id, u.username AS owner_username, l.content, l.created_at, l.updated_at
    FROM logs l
    LEFT JOIN users u ON u.id = l.owner_id
"#;

/// PostgreSQL-backed store; log content lives in a JSONB column
#[derive(Clone)]
pub struct PgLogStore {
    pool: PgPool,
}

impl PgLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn create_user(&self, username: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username) VALUES ($1, $2) RETURNING id, username, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}

#[async_trait]
impl LogStore for PgLogStore {
    async fn list(&self, owner: Option<Uuid>) -> Result<Vec<Log>, DatabaseError> {
        let sql = format!(
            "{} WHERE ($1::uuid IS NULL OR l.owner_id = $1) ORDER BY l.created_at DESC, l.id DESC",
            SELECT_LOGS
        );

        let rows = sqlx::query_as::<_, LogRow>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Log::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Log>, DatabaseError> {
        let sql = format!("{} WHERE l.id = $1", SELECT_LOGS);

        let row = sqlx::query_as::<_, LogRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Log::from))
    }

    async fn create(&self, log: NewLog) -> Result<Log, DatabaseError> {
        // Insert and resolve the owner's username in one round trip
        let sql = r#"
            WITH inserted AS (
                INSERT INTO logs (id, owner_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, owner_id, content, created_at, updated_at
            )
            SELECT i.id, i.owner_id, u.username AS owner_username, i.content, i.created_at, i.updated_at
            FROM inserted i
            LEFT JOIN users u ON u.id = i.owner_id
        "#;

        let row = sqlx::query_as::<_, LogRow>(sql)
            .bind(Uuid::new_v4())
            .bind(log.owner_id)
            .bind(Json(log.content))
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;

        Ok(row.into())
    }

    async fn update(&self, id: Uuid, changes: Map<String, Value>) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE logs SET content = content || $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(Json(changes))
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Log {} not found", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Log {} not found", id)));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
