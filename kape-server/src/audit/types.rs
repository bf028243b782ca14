//! 审计日志类型定义
//!
//! 后台审计日志的核心数据结构。
//! 所有条目不可变、不可删除，SHA256 哈希链防篡改。

use crate::db::models::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// 审计操作类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ═══ 认证 ═══
    /// 登录成功
    LoginSuccess,
    /// 登录失败
    LoginFailed,
    /// 登出
    Logout,

    // ═══ 订单（财务关键）═══
    /// POS 当场结账成交
    PosSaleCompleted,
    /// 线上订单创建
    OnlineOrderPlaced,
    /// 订单被接单
    OrderAccepted,
    /// 订单制作完成
    OrderReady,
    /// 订单完成交付
    OrderCompleted,
    /// 订单取消
    OrderCancelled,

    // ═══ 库存管理 ═══
    /// 商品创建
    InventoryCreated,
    /// 商品更新
    InventoryUpdated,
    /// 商品删除
    InventoryDeleted,
    /// 库存调整
    StockAdjusted,

    // ═══ 系统配置 ═══
    /// 店铺设置变更
    SettingsChanged,
    /// 账号创建
    UserCreated,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 审计日志条目（不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// 操作类型
    pub action: AuditAction,
    /// 资源集合 ("orders", "inventory", …)
    pub resource: String,
    /// 资源记录 ID
    pub resource_id: String,
    /// 操作者 ID (匿名操作为 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    /// 操作者显示名快照
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_name: Option<String>,
    /// 附加细节 (JSON)
    pub details: serde_json::Value,
    /// 上一条目的哈希
    pub prev_hash: String,
    /// 本条目哈希: SHA256(prev_hash | action | resource_id | created_at | details)
    pub curr_hash: String,
    /// 创建时间 (毫秒)
    pub created_at: i64,
}

impl AuditEntry {
    /// 计算条目内容哈希
    pub fn compute_hash(
        prev_hash: &str,
        action: AuditAction,
        resource_id: &str,
        created_at: i64,
        details: &serde_json::Value,
    ) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(prev_hash.as_bytes());
        hasher.update(action.to_string().as_bytes());
        hasher.update(resource_id.as_bytes());
        hasher.update(created_at.to_le_bytes());
        hasher.update(details.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// 校验本条目与前序哈希是否一致
    pub fn verify_chain(&self, prev_hash: &str) -> bool {
        self.prev_hash == prev_hash
            && self.curr_hash
                == Self::compute_hash(
                    prev_hash,
                    self.action,
                    &self.resource_id,
                    self.created_at,
                    &self.details,
                )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let details = serde_json::json!({"total": 198.0});
        let a = AuditEntry::compute_hash("GENESIS", AuditAction::OrderCompleted, "O-1", 42, &details);
        let b = AuditEntry::compute_hash("GENESIS", AuditAction::OrderCompleted, "O-1", 42, &details);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_changes_with_content() {
        let details = serde_json::json!({});
        let a = AuditEntry::compute_hash("GENESIS", AuditAction::OrderCompleted, "O-1", 42, &details);
        let b = AuditEntry::compute_hash("GENESIS", AuditAction::OrderCancelled, "O-1", 42, &details);
        let c = AuditEntry::compute_hash("GENESIS", AuditAction::OrderCompleted, "O-2", 42, &details);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn chain_verification_detects_tampering() {
        let details = serde_json::json!({"delta": -2});
        let curr_hash =
            AuditEntry::compute_hash("GENESIS", AuditAction::StockAdjusted, "inventory:1", 7, &details);
        let mut entry = AuditEntry {
            id: None,
            action: AuditAction::StockAdjusted,
            resource: "inventory".into(),
            resource_id: "inventory:1".into(),
            operator_id: None,
            operator_name: None,
            details,
            prev_hash: "GENESIS".into(),
            curr_hash,
            created_at: 7,
        };
        assert!(entry.verify_chain("GENESIS"));

        entry.resource_id = "inventory:2".into(); // tampered
        assert!(!entry.verify_chain("GENESIS"));
    }
}
