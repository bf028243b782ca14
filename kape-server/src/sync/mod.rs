//! 变更广播总线
//!
//! 实现对外承诺的 `subscribe(collection, callback)` 协作者：
//! 每次资源变更发布一条 [`SyncPayload`]，订阅端 (SSE) 按
//! (collection, version) 判断数据新旧。进程内广播，无持久化。

use dashmap::DashMap;
use shared::sync::SyncPayload;
use tokio::sync::broadcast;

/// Broadcast channel capacity; slow subscribers fall behind and resync
const SYNC_CHANNEL_CAPACITY: usize = 4096;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每个集合维护独立的版本号，支持原子递增。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定集合的版本号并返回新值 (不存在时从 0 递增，返回 1)
    pub fn increment(&self, collection: &str) -> u64 {
        let mut entry = self.versions.entry(collection.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 当前版本号 (不存在时返回 0)
    pub fn get(&self, collection: &str) -> u64 {
        self.versions.get(collection).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// In-process sync bus
#[derive(Debug)]
pub struct SyncBus {
    tx: broadcast::Sender<SyncPayload>,
    versions: ResourceVersions,
}

impl SyncBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SYNC_CHANNEL_CAPACITY);
        Self {
            tx,
            versions: ResourceVersions::new(),
        }
    }

    /// Publish one change; returns the assigned version.
    ///
    /// Having no subscribers is not an error; the feed is best-effort.
    pub fn publish<T: serde::Serialize>(
        &self,
        collection: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) -> u64 {
        let version = self.versions.increment(collection);
        let payload = SyncPayload::new(collection, version, action, id, data);
        let _ = self.tx.send(payload);
        version
    }

    /// Subscribe to the feed from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.tx.subscribe()
    }

    /// Current version of a collection
    pub fn version(&self, collection: &str) -> u64 {
        self.versions.get(collection)
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn versions_increment_per_collection() {
        let bus = SyncBus::new();
        assert_eq!(bus.publish::<()>("orders", "created", "O-1", None), 1);
        assert_eq!(bus.publish::<()>("orders", "updated", "O-1", None), 2);
        assert_eq!(bus.publish::<()>("inventory", "created", "x", None), 1);
        assert_eq!(bus.version("orders"), 2);
        assert_eq!(bus.version("settings"), 0);
    }

    #[tokio::test]
    async fn subscriber_receives_published_payloads() {
        let bus = SyncBus::new();
        let mut rx = bus.subscribe();
        bus.publish("orders", "created", "O-1", Some(&serde_json::json!({"total": 198.0})));

        let payload = rx.recv().await.unwrap();
        assert_eq!(payload.collection, "orders");
        assert_eq!(payload.action, "created");
        assert_eq!(payload.id, "O-1");
        assert_eq!(payload.version, 1);
        assert!(payload.data.is_some());
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_fine() {
        let bus = SyncBus::new();
        // No receiver exists; publish must not panic or error
        assert_eq!(bus.publish::<()>("orders", "deleted", "O-9", None), 1);
    }
}
