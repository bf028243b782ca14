//! 订单流程 - 系统里唯一有状态的工作流
//!
//! # 两条路径
//!
//! - **POS**: 收银台结账，一步创建即完成 (`Completed`)，现金校验在前
//! - **Online**: 创建为 `Pending`，由店员 accept → ready → complete 推进
//!
//! 所有状态变更都经过 [`shared::order::OrderStatus::apply`] 状态机；
//! 持久化使用 compare-and-set，两个店员竞争同一订单时只有一方成功。

pub mod service;

pub use service::{OrderService, PosReceipt};
