//! Store Settings Model (Singleton)
//!
//! 店铺偏好设置，全店只有一条记录

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Store settings entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// 店铺名称
    pub name: String,
    /// 店铺地址
    pub address: String,
    /// 联系电话
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// 电子邮箱
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 营业时间描述
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// 货币代码
    pub currency: String,
    /// 是否接受线上订单
    pub online_ordering_enabled: bool,
    /// 新品默认低库存阈值
    pub default_low_stock_threshold: i32,
    /// 创建时间
    pub created_at: Option<i64>,
    /// 更新时间
    pub updated_at: Option<i64>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            id: None,
            name: "Kape".to_string(),
            address: String::new(),
            phone: None,
            email: None,
            opening_hours: None,
            currency: "PHP".to_string(),
            online_ordering_enabled: true,
            default_low_stock_threshold: 5,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Update store settings payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_ordering_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_low_stock_threshold: Option<i32>,
}
