//! Inventory Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "inventory";

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        // 接受 "inventory:xyz" 或裸 key
        if id.contains(':') {
            id.parse::<RecordId>()
                .map_err(|_| RepoError::Validation(format!("invalid record id: {id}")))
        } else {
            Ok(RecordId::from_table_key(TABLE, id))
        }
    }

    /// All items, grouped for the back office
    pub async fn find_all(&self) -> RepoResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query("SELECT * FROM inventory ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Menu view: available items with stock on hand
    pub async fn find_available(&self) -> RepoResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM inventory \
                 WHERE is_available = true AND stock > 0 \
                 ORDER BY category, name",
            )
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<InventoryItem>> {
        let rid = Self::parse_id(id)?;
        let item: Option<InventoryItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    pub async fn create(&self, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
        let now = now_millis();
        let item = InventoryItem {
            id: None,
            name: data.name,
            category: data.category,
            price: data.price,
            cost: data.cost,
            stock: data.stock,
            low_stock_threshold: data.low_stock_threshold.unwrap_or(5),
            is_available: data.is_available.unwrap_or(true),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<InventoryItem> =
            self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("failed to create inventory item".to_string()))
    }

    pub async fn update(&self, id: &str, data: InventoryItemUpdate) -> RepoResult<InventoryItem> {
        let rid = Self::parse_id(id)?;

        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", rid.clone()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Option<InventoryItem> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("inventory item {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = Self::parse_id(id)?;
        let deleted: Option<InventoryItem> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }

    /// Adjust stock by a delta, clamped at zero.
    ///
    /// Read-modify-write like the rest of the admin surface; the store is
    /// the arbiter of durability, not of concurrency.
    pub async fn adjust_stock(&self, id: &str, delta: i32) -> RepoResult<InventoryItem> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("inventory item {id}")))?;
        let new_stock = (current.stock + delta).max(0);

        self.update(
            id,
            InventoryItemUpdate {
                stock: Some(new_stock),
                ..Default::default()
            },
        )
        .await
    }
}
