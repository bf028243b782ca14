//! Inventory Item Model
//!
//! 菜单与库存合一：`inventory` 集合既驱动顾客菜单，也承载后台库存管理。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Inventory item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// 商品名称
    pub name: String,
    /// 分类 (如 "Coffee", "Pastry")
    pub category: String,
    /// 售价
    pub price: f64,
    /// 成本价 (用于估值)
    pub cost: f64,
    /// 当前库存
    pub stock: i32,
    /// 低库存告警阈值
    pub low_stock_threshold: i32,
    /// 是否在菜单上可见
    pub is_available: bool,
    /// 创建时间 (毫秒)
    pub created_at: Option<i64>,
    /// 更新时间 (毫秒)
    pub updated_at: Option<i64>,
}

impl InventoryItem {
    /// 库存是否低于告警阈值
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}

/// Create payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InventoryItemCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 60))]
    pub category: String,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub price: f64,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub cost: f64,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(range(min = 0))]
    pub low_stock_threshold: Option<i32>,
    pub is_available: Option<bool>,
}

/// Update payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct InventoryItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 60))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub low_stock_threshold: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_stock_detection() {
        let item = InventoryItem {
            id: None,
            name: "Beans".into(),
            category: "Supplies".into(),
            price: 0.0,
            cost: 350.0,
            stock: 3,
            low_stock_threshold: 5,
            is_available: false,
            created_at: None,
            updated_at: None,
        };
        assert!(item.is_low_stock());
    }

    #[test]
    fn create_payload_validation() {
        let ok = InventoryItemCreate {
            name: "Latte".into(),
            category: "Coffee".into(),
            price: 120.0,
            cost: 40.0,
            stock: 100,
            low_stock_threshold: Some(10),
            is_available: Some(true),
        };
        assert!(ok.validate().is_ok());

        let bad = InventoryItemCreate {
            name: "".into(),
            category: "Coffee".into(),
            price: -5.0,
            cost: 40.0,
            stock: -1,
            low_stock_threshold: None,
            is_available: None,
        };
        assert!(bad.validate().is_err());
    }
}
