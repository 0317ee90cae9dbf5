use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use super::model::UserData;

/// Key-value persistence for per-user journals.
#[async_trait]
pub trait UserDataStore: Send + Sync {
    async fn load(&self, user_id: Uuid) -> anyhow::Result<Option<UserData>>;
    async fn save(&self, user_id: Uuid, data: &UserData) -> anyhow::Result<()>;
}

/// Stores each journal as a single JSONB document in `user_data`.
#[derive(Clone)]
pub struct PgUserDataStore {
    db: PgPool,
}

impl PgUserDataStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDataStore for PgUserDataStore {
    async fn load(&self, user_id: Uuid) -> anyhow::Result<Option<UserData>> {
        let row = sqlx::query_as::<_, (Json<UserData>,)>(
            r#"
            SELECT data
              FROM user_data
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("load journal for {}", user_id))?;

        Ok(row.map(|(Json(data),)| data))
    }

    async fn save(&self, user_id: Uuid, data: &UserData) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_data (user_id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (user_id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(Json(data))
        .execute(&self.db)
        .await
        .with_context(|| format!("save journal for {}", user_id))?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub struct InMemoryUserDataStore {
    docs: Arc<tokio::sync::RwLock<HashMap<Uuid, UserData>>>,
}

#[cfg(test)]
#[async_trait]
impl UserDataStore for InMemoryUserDataStore {
    async fn load(&self, user_id: Uuid) -> anyhow::Result<Option<UserData>> {
        Ok(self.docs.read().await.get(&user_id).cloned())
    }

    async fn save(&self, user_id: Uuid, data: &UserData) -> anyhow::Result<()> {
        self.docs.write().await.insert(user_id, data.clone());
        Ok(())
    }
}

/// One async lock per user so load/modify/save cycles never interleave.
#[derive(Clone, Default)]
pub struct UserLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl UserLocks {
    pub async fn acquire(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.entry(user_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}
