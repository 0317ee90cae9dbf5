use crate::config::AppConfig;
use crate::journal::store::{PgUserDataStore, UserDataStore, UserLocks};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub journals: Arc<dyn UserDataStore>,
    pub locks: UserLocks,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let journals = Arc::new(PgUserDataStore::new(db.clone())) as Arc<dyn UserDataStore>;

        Ok(Self::from_parts(db, config, journals))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>, journals: Arc<dyn UserDataStore>) -> Self {
        Self {
            db,
            config,
            journals,
            locks: UserLocks::default(),
        }
    }

    /// Test state: lazy (never connected) pool and an in-memory journal store.
    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::journal::store::InMemoryUserDataStore;

        let config = Arc::new(AppConfig::test_default());
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool ok");
        let journals = Arc::new(InMemoryUserDataStore::default()) as Arc<dyn UserDataStore>;
        Self::from_parts(db, config, journals)
    }
}
