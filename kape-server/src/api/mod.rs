//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`menu`] - 顾客菜单 (公开)
//! - [`orders`] - POS 结账、线上下单、生命周期操作
//! - [`inventory`] - 库存管理接口
//! - [`customers`] - 顾客档案接口
//! - [`analytics`] - 后台聚合统计
//! - [`settings`] - 店铺设置接口
//! - [`audit`] - 审计日志接口
//! - [`sync`] - 变更实时推送 (SSE)

pub mod analytics;
pub mod audit;
pub mod auth;
pub mod customers;
pub mod health;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod settings;
pub mod sync;

use crate::core::ServerState;
use axum::Router;

/// 汇总全部子路由
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(inventory::router())
        .merge(customers::router())
        .merge(analytics::router())
        .merge(settings::router())
        .merge(audit::router())
        .merge(sync::router())
}
