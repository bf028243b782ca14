//! Order domain - record, lifecycle and pricing
//!
//! # 模块结构
//!
//! - [`types`] - 枚举和输入类型 (cart, checkout, payment)
//! - [`status`] - 订单状态机 (唯一的状态变更入口)
//! - [`pricing`] - 金额计算 (rust_decimal 精确运算)
//! - [`record`] - 订单记录及其不变量
//! - [`error`] - 订单流程错误

pub mod error;
pub mod pricing;
pub mod record;
pub mod status;
pub mod types;

pub use error::OrderFlowError;
pub use pricing::{PricingBreakdown, change_due, display_total, is_cash_sufficient, price_order};
pub use record::Order;
pub use status::{OrderStatus, StatusAction};
pub use types::{
    CartItem, CheckoutRequest, CustomerRef, DiscountType, OnlineOrderRequest, OrderItem,
    OrderSource, PaymentMethod,
};
