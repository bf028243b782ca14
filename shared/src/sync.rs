//! Sync-feed payload shared between server and clients
//!
//! 服务端在每次资源变更后广播一条 SyncPayload，
//! 客户端按 (collection, version) 判断数据新旧。

use serde::{Deserialize, Serialize};

/// One change notification on the live feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncPayload {
    /// Collection name ("orders", "inventory", "users", "settings")
    pub collection: String,
    /// Per-collection monotonic version, assigned by the server
    pub version: u64,
    /// "created" | "updated" | "deleted"
    pub action: String,
    /// Record id within the collection
    pub id: String,
    /// Full record data; `None` for deletions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl SyncPayload {
    pub fn new<T: Serialize>(
        collection: &str,
        version: u64,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) -> Self {
        Self {
            collection: collection.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_payload_omits_data() {
        let p = SyncPayload::new::<()>("orders", 7, "deleted", "O-123", None);
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("\"data\""));
        let back: SyncPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
