//! Store Settings Repository (Singleton)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{StoreSettings, StoreSettingsUpdate};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "settings";
const SINGLETON_ID: &str = "main";

#[derive(Clone)]
pub struct SettingsRepository {
    base: BaseRepository,
}

impl SettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton settings record
    pub async fn get_or_create(&self) -> RepoResult<StoreSettings> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        let settings = StoreSettings {
            created_at: Some(now_millis()),
            ..Default::default()
        };

        let created: Option<StoreSettings> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(settings)
            .await?;
        created.ok_or_else(|| RepoError::Database("failed to create settings".to_string()))
    }

    /// Get the singleton settings record
    pub async fn get(&self) -> RepoResult<Option<StoreSettings>> {
        let settings: Option<StoreSettings> =
            self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(settings)
    }

    /// Merge-update the singleton
    pub async fn update(&self, data: StoreSettingsUpdate) -> RepoResult<StoreSettings> {
        // Ensure singleton exists
        self.get_or_create().await?;

        let singleton_id = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", singleton_id.clone()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Option<StoreSettings> =
            self.base.db().update(singleton_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::Database("failed to update settings".to_string()))
    }
}
