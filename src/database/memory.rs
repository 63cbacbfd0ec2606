use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Log, NewLog, Owner, User};
use crate::database::store::LogStore;

#[derive(Debug, Clone)]
struct StoredLog {
    id: Uuid,
    owner_id: Uuid,
    content: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    logs: HashMap<Uuid, StoredLog>,
    last_created: Option<DateTime<Utc>>,
}

impl Inner {
    /// Creation stamps are strictly increasing so "newest first" is total.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_created {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_created = Some(now);
        now
    }

    fn resolve(&self, stored: &StoredLog) -> Log {
        Log {
            id: stored.id,
            owner: Owner {
                id: stored.owner_id,
                username: self.users.get(&stored.owner_id).map(|u| u.username.clone()),
            },
            content: stored.content.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

/// In-process store with the same semantics as `PgLogStore`, including the
/// owner reference check.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    inner: RwLock<Inner>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, username: &str) -> Result<User, DatabaseError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == username) {
            return Err(DatabaseError::Constraint(format!("Username '{}' is taken", username)));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn list(&self, owner: Option<Uuid>) -> Result<Vec<Log>, DatabaseError> {
        let inner = self.inner.read().await;
        let mut logs: Vec<Log> = inner
            .logs
            .values()
            .filter(|stored| owner.map_or(true, |id| stored.owner_id == id))
            .map(|stored| inner.resolve(stored))
            .collect();

        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(logs)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Log>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.logs.get(&id).map(|stored| inner.resolve(stored)))
    }

    async fn create(&self, log: NewLog) -> Result<Log, DatabaseError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&log.owner_id) {
            return Err(DatabaseError::Constraint(
                "Owner does not reference an existing user".to_string(),
            ));
        }

        let now = inner.next_timestamp();
        let stored = StoredLog {
            id: Uuid::new_v4(),
            owner_id: log.owner_id,
            content: log.content,
            created_at: now,
            updated_at: now,
        };
        let created = inner.resolve(&stored);
        inner.logs.insert(stored.id, stored);
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: Map<String, Value>) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .logs
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Log {} not found", id)))?;

        stored.content.extend(changes);
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;
        inner
            .logs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("Log {} not found", id)))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(title: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("title".to_string(), json!(title));
        map
    }

    #[tokio::test]
    async fn lists_newest_first_and_filters_by_owner() {
        let store = MemoryLogStore::new();
        let alice = store.add_user("alice").await.unwrap();
        let bob = store.add_user("bob").await.unwrap();

        for (owner, title) in [(alice.id, "a1"), (bob.id, "b1"), (alice.id, "a2")] {
            store
                .create(NewLog {
                    owner_id: owner,
                    content: content(title),
                })
                .await
                .unwrap();
        }

        let all = store.list(None).await.unwrap();
        let titles: Vec<_> = all.iter().map(|l| l.content["title"].clone()).collect();
        assert_eq!(titles, vec![json!("a2"), json!("b1"), json!("a1")]);

        let mine = store.list(Some(alice.id)).await.unwrap();
        let titles: Vec<_> = mine.iter().map(|l| l.content["title"].clone()).collect();
        assert_eq!(titles, vec![json!("a2"), json!("a1")]);
        assert!(mine.iter().all(|l| l.owner.username.as_deref() == Some("alice")));
    }

    #[tokio::test]
    async fn create_rejects_unknown_owner() {
        let store = MemoryLogStore::new();
        let err = store
            .create(NewLog {
                owner_id: Uuid::new_v4(),
                content: content("orphan"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Constraint(_)));
    }

    #[tokio::test]
    async fn update_merges_and_delete_removes() {
        let store = MemoryLogStore::new();
        let user = store.add_user("erin").await.unwrap();
        let log = store
            .create(NewLog {
                owner_id: user.id,
                content: content("draft"),
            })
            .await
            .unwrap();

        let mut changes = Map::new();
        changes.insert("body".to_string(), json!("text"));
        store.update(log.id, changes).await.unwrap();

        let found = store.find_404(log.id).await.unwrap();
        assert_eq!(found.content["title"], "draft");
        assert_eq!(found.content["body"], "text");

        store.delete(log.id).await.unwrap();
        assert!(store.find(log.id).await.unwrap().is_none());
        assert!(matches!(store.delete(log.id).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(store.find_404(log.id).await, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let store = MemoryLogStore::new();
        store.add_user("frank").await.unwrap();
        assert!(matches!(store.add_user("frank").await, Err(DatabaseError::Constraint(_))));
    }
}
